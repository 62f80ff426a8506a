use std::path::PathBuf;

use chrono::Local;

use super::{RunArgs, collect_pages, progress_bar, resolve_run};
use crate::{error, info, management::BackupManager, success};

/// Fetches the pages of a run and stores them as a JSON backup.
///
/// The file can be fed back with `--backup` to build tables or videos
/// without contacting Last.fm again. Without `output` the backup goes to
/// `<data_local_dir>/lastfm-timelapse/backups/<username>.json`.
pub async fn backup(args: RunArgs, output: Option<PathBuf>) {
    let run = match resolve_run(&args, Local::now().date_naive()).await {
        Ok(run) => run,
        Err(e) => error!("{}", e),
    };

    info!(
        "Backing up scrobbles of {user} ({start} - {end})",
        user = run.username,
        start = run.start_date,
        end = run.end_date
    );

    let pb = progress_bar();
    pb.set_message("Fetching data from Last.fm...");
    let pages = match collect_pages(&run, args.backup.as_deref(), &pb).await {
        Ok(pages) => pages,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    pb.finish_and_clear();

    let path = output.unwrap_or_else(|| BackupManager::default_path(&run.username));
    let manager = BackupManager::from_pages(path, &pages);
    match manager.persist().await {
        Ok(()) => success!(
            "Saved {pages} pages ({scrobbles} scrobbles) to {path}",
            pages = manager.pages().len(),
            scrobbles = pages.iter().map(|p| p.tracks().len()).sum::<usize>(),
            path = manager.path().display()
        ),
        Err(e) => error!("Cannot save backup to {}: {}", manager.path().display(), e),
    }
}
