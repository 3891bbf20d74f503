use std::thread;

use pricing_engine::BatchContext;
use pricing_logging::{price_info, price_warn};

/// Cancels the batch on the first Ctrl+C. The listener thread lives until the
/// process exits; a finished batch simply ignores the late cancellation.
pub fn cancel_on_ctrl_c(context: BatchContext) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            price_warn!("Ctrl+C handling unavailable: {}", err);
            return;
        }
    };

    let spawned = thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(move || {
            runtime.block_on(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    price_info!("Received Ctrl+C, stopping after the current item");
                    println!("Stop requested; writing results collected so far...");
                    context.cancel();
                }
            });
        });
    if let Err(err) = spawned {
        price_warn!("Ctrl+C handling unavailable: {}", err);
    }
}
