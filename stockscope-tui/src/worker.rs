//! Background worker thread — all network fetches and analysis run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The
//! worker owns the memo-cached fetcher and the sentiment scorer; the main
//! thread never blocks on the network.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use stockscope_core::data::{yahoo_fetcher, YahooFetcher};
use stockscope_core::sentiment::VaderScorer;
use stockscope_core::{analyze, DashboardConfig, DashboardSnapshot};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Analyze(DashboardConfig),
    ClearCache,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Snapshot(Box<DashboardSnapshot>),
    AnalyzeFailed { ticker: String, message: String },
    CacheCleared,
}

/// Spawn the background worker thread.
pub fn spawn_worker(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) -> JoinHandle<()> {
    thread::Builder::new()
        .name("stockscope-worker".into())
        .spawn(move || {
            worker_loop(rx, tx);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    let mut fetcher: YahooFetcher = yahoo_fetcher();
    let scorer = VaderScorer;

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::ClearCache) => {
                fetcher.clear_cache();
                let _ = tx.send(WorkerResponse::CacheCleared);
            }
            Ok(WorkerCommand::Analyze(config)) => {
                let ticker = config.ticker.clone();
                match analyze(&config, &mut fetcher, &scorer) {
                    Ok(snapshot) => {
                        let _ = tx.send(WorkerResponse::Snapshot(Box::new(snapshot)));
                    }
                    Err(e) => {
                        let _ = tx.send(WorkerResponse::AnalyzeFailed {
                            ticker,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx);
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn worker_exits_when_sender_drops() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx);
        drop(cmd_tx);
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn clear_cache_acknowledges() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx);
        cmd_tx.send(WorkerCommand::ClearCache).unwrap();
        match resp_rx.recv().unwrap() {
            WorkerResponse::CacheCleared => {}
            other => panic!("expected CacheCleared, got {other:?}"),
        }
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
