use crate::{Cli, replay_once};
use orbit::config::{self, WatchEvent};
use tokio::runtime::Runtime;

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    let mut paths = vec![cli.trace()?.to_path_buf()];
    match &cli.config {
        Some(path) => paths.push(path.clone()),
        None => paths.extend(config::get_config_path().ok()),
    }

    rt.block_on(async {
        let (tx, rx) = async_channel::bounded(32);
        let watcher = config::run_async_watcher(paths, tx);

        let replays = async {
            report(replay_once(cli));
            while let Ok(WatchEvent::Changed(path)) = rx.recv().await {
                log::info!("{} changed, replaying", path.display());
                report(replay_once(cli));
            }
        };

        tokio::join!(watcher, replays);
    });

    Ok(())
}

fn report(result: anyhow::Result<()>) {
    if let Err(e) = result {
        log::error!("Replay failed: {:#}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    #[tokio::test]
    async fn test_watcher_reports_only_watched_file() {
        let dir = std::env::temp_dir().join(format!("orbit-watch-{}", std::process::id()));
        fs_err::create_dir_all(&dir).unwrap();
        let watched = dir.join("trace.jsonl");
        let sibling = dir.join("other.txt");
        let expected = std::path::absolute(&watched).unwrap();

        let (tx, rx) = async_channel::bounded(32);
        let watcher = config::run_async_watcher(vec![watched.clone()], tx);

        let writes = async {
            sleep(Duration::from_millis(200)).await;
            fs_err::write(&sibling, "noise").unwrap();
            sleep(Duration::from_millis(200)).await;
            fs_err::write(&watched, "{}\n").unwrap();

            let first = timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("no change reported")
                .unwrap();
            assert_eq!(first, WatchEvent::Changed(expected.clone()));

            // A single write may surface as several notify events, all for the same file.
            while let Ok(Ok(event)) = timeout(Duration::from_millis(300), rx.recv()).await {
                assert_eq!(event, WatchEvent::Changed(expected.clone()));
            }
        };

        tokio::select! {
            _ = watcher => panic!("watcher exited early"),
            _ = writes => {}
        }

        let _ = fs_err::remove_dir_all(&dir);
    }
}
