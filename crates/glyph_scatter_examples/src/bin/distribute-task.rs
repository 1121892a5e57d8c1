use std::thread;
use std::time::Duration;

use glyph_scatter::prelude::*;

fn main() -> anyhow::Result<()> {
    // A heavy run computed off the main thread, then a second one cancelled
    // shortly after it starts.
    let config = DistributionConfig::new(640.0, 360.0)
        .with_max_iterations(50)
        .with_acceptable_error(0.0)
        .with_sorting(SortStrategy::CostFunction)
        .with_cost_function_y_weight(0.25);

    let task = DistributionTask::spawn(400, config.clone(), 7);
    while !task.is_finished() {
        thread::sleep(Duration::from_millis(10));
    }
    let result = task.join()?;
    println!(
        "background run: {} points after {} rounds",
        result.points.len(),
        result.iterations
    );

    let doomed = DistributionTask::spawn(2000, config, 8);
    thread::sleep(Duration::from_millis(5));
    doomed.cancel();
    match doomed.join() {
        Err(Error::Cancelled) => println!("second run cancelled as requested"),
        Ok(result) => println!("second run finished before the cancel: {} points", result.points.len()),
        Err(other) => return Err(other.into()),
    }

    Ok(())
}
