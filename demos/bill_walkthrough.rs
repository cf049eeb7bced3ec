use volt::billing::{consumed_units, project_period, ReferencePeriod, TariffEngine};
use volt::core::ReportGenerator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Volt bill walkthrough");
    println!("=====================\n");

    let engine = TariffEngine::reference();
    let generator = ReportGenerator::new(engine.config().currency.clone());

    // Mid-month reading: 15 of 30 days elapsed
    let units = consumed_units(1150.0, 1000.0)?;
    println!("Readings 1000 -> 1150: {} units\n", units);

    let bill = engine.price_usage(units)?;
    println!("{}", generator.render_bill(&bill));

    let last_month = ReferencePeriod {
        usage_units: 260.0,
        total_cost: 5100.0,
    };
    let forecast = project_period(engine, units, 15, 30, Some(last_month))?;
    println!("{}", generator.render_forecast(&forecast));

    // Slab boundaries are where the bill jumps
    println!("Boundary sweep:");
    for units in [49.0, 50.0, 51.0, 99.0, 100.0, 101.0, 700.0, 701.0] {
        let bill = engine.price_usage(units)?;
        println!(
            "  {:>5} units -> base {:>9.2}, total {:>9.2}{}",
            units,
            bill.base_cost,
            bill.total_cost,
            if bill.approaching_next_slab { "  (near next slab)" } else { "" }
        );
    }

    Ok(())
}
