use std::sync::Arc;
use std::thread;
use std::time::Duration;
use task_worker::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> task_worker::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("task_worker=debug")),
        )
        .init();

    println!("=== Serial Worker Example ===\n");

    let config = WorkerConfig::builder().thread_name("demo-worker").build()?;
    let worker = Arc::new(TaskWorker::with_config(config)?);

    // Several producers, one consumer: output from each producer stays in order.
    let producers: Vec<_> = (0..3)
        .map(|p| {
            let worker = worker.clone();
            thread::spawn(move || {
                for i in 0..3 {
                    worker.schedule(move || {
                        println!("[{}] producer {} / item {}", thread::current().name().unwrap_or("?"), p, i);
                        thread::sleep(Duration::from_millis(5));
                    });
                }
            })
        })
        .collect();

    for producer in producers {
        producer.join().expect("producer panicked");
    }

    // A failing task is logged and skipped.
    worker.schedule(|| panic!("this task fails"));
    schedule!(worker, || println!("still running after a panic"), || println!("last task"));

    println!("pending before shutdown: {}", worker.pending());

    let worker = Arc::try_unwrap(worker).expect("all producers have finished");
    let stats = worker.stats();
    worker.shutdown()?;

    println!(
        "\nscheduled: {}, panicked so far: {}",
        stats.tasks_scheduled, stats.tasks_panicked
    );
    println!("\n=== Example Complete ===");
    Ok(())
}
