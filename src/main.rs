use chrono::Local;
use serde::Serialize;
use volt::billing::{
    budget_status, consumed_units, consumed_units_strict, project_period, BillingPeriod,
    BudgetStatus, CostBreakdown, ForecastResult, ReferencePeriod, TariffEngine,
};
use volt::cli::Cli;
use volt::config::{ConfigLoader, TariffConfig};
use volt::core::ReportGenerator;
use volt::utils::init_logging;

#[derive(Serialize)]
struct Report {
    bill: CostBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    forecast: Option<ForecastResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    budget: Option<BudgetStatus>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse_args();

    // Handle tariff commands
    if cli.init {
        let path = cli.config.clone().unwrap_or_else(TariffConfig::get_config_path);
        TariffConfig::init_at(path)?;
        return Ok(());
    }

    if cli.check {
        let config = load_tariff(&cli)?;
        config.check()?;
        println!("✓ Tariff valid ({} slabs)", config.slabs.len());
        return Ok(());
    }

    // An explicit --config must load; the default location falls back to the reference table
    let config = match &cli.config {
        Some(_) => load_tariff(&cli)?,
        None => ConfigLoader::load(),
    };

    if cli.print {
        config.print()?;
        return Ok(());
    }

    let units = match (cli.units, cli.previous, cli.current) {
        (Some(units), _, _) => units,
        (None, Some(previous), Some(current)) if cli.strict => {
            consumed_units_strict(current, previous)?
        }
        (None, Some(previous), Some(current)) => consumed_units(current, previous)?,
        _ => {
            eprintln!("Error: provide --units or both --previous and --current");
            std::process::exit(1);
        }
    };

    let engine = TariffEngine::new(config)?;
    let bill = engine.price_usage(units)?;

    let forecast = if cli.forecast {
        let today = Local::now().date_naive();
        let period = BillingPeriod::month_of(today);
        let days_elapsed = cli.elapsed_days.unwrap_or_else(|| period.days_elapsed(today));
        let days_in_period = cli.period_days.unwrap_or_else(|| period.days_in_period());

        let reference = match (cli.reference_usage, cli.reference_cost) {
            (Some(usage_units), Some(total_cost)) => Some(ReferencePeriod {
                usage_units,
                total_cost,
            }),
            _ => None,
        };

        Some(project_period(
            &engine,
            units,
            days_elapsed,
            days_in_period,
            reference,
        )?)
    } else {
        None
    };

    let budget = match cli.budget {
        Some(budget) => {
            let cost = forecast
                .as_ref()
                .map(|f| f.projected_cost.total_cost)
                .unwrap_or(bill.total_cost);
            Some(budget_status(cost, budget)?)
        }
        None => None,
    };

    let report = Report {
        bill,
        forecast,
        budget,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let generator = ReportGenerator::new(engine.config().currency.clone());
    print!("{}", generator.render_bill(&report.bill));
    if let Some(forecast) = &report.forecast {
        print!("{}", generator.render_forecast(forecast));
    }
    if let Some(status) = &report.budget {
        print!("{}", generator.render_budget(status));
    }

    Ok(())
}

/// Load the tariff named on the command line, or the default one
fn load_tariff(cli: &Cli) -> Result<TariffConfig, volt::config::ConfigError> {
    match &cli.config {
        Some(path) => {
            let config = ConfigLoader::load_from_path(path)?.with_env_overrides();
            config.validate()?;
            Ok(config)
        }
        None => TariffConfig::load(),
    }
}
