use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use chrono::Local;

use super::{RunArgs, collect_pages, progress_bar, resolve_run, set_progress};
use crate::{
    error, info,
    render::{CommandRenderer, RenderLayout, Renderer, write_matrix_csv},
    success, timeline, utils,
};

/// Runs the whole pipeline and writes the rendered video.
///
/// # Stages
///
/// 1. Fetch pages (live or from `--backup`), 0% to 50%
/// 2. Build the cumulative table, 60%
/// 3. Keep the leading entities of each day, 80%
/// 4. Render the video, 100%
///
/// The video lands in `output` or, by default, in
/// `{username}_{chart}_{start}_{end}.mp4` in the working directory. With
/// `csv` the final table is exported as well.
///
/// Any failure prints the error and ends the process with exit code 1;
/// nothing partial is written.
pub async fn generate(args: RunArgs, output: Option<PathBuf>, csv: Option<PathBuf>) {
    let run = match resolve_run(&args, Local::now().date_naive()).await {
        Ok(run) => run,
        Err(e) => error!("{}", e),
    };

    info!(
        "Generating {chart} timelapse for {user} ({start} - {end})",
        chart = run.chart_type,
        user = run.username,
        start = run.start_date,
        end = run.end_date
    );

    let pb = progress_bar();
    let mut timings: Vec<(&str, Duration)> = Vec::new();

    pb.set_message("Fetching data from Last.fm...");
    let started = Instant::now();
    let pages = match collect_pages(&run, args.backup.as_deref(), &pb).await {
        Ok(pages) => pages,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    timings.push(("fetch", started.elapsed()));

    pb.set_message("Preparing table...");
    let started = Instant::now();
    let built = match timeline::build_table(&pages, run.chart_type) {
        Ok(built) => built,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    set_progress(&pb, 3.0 / 5.0);
    timings.push(("build table", started.elapsed()));

    pb.set_message("Optimizing table...");
    let started = Instant::now();
    let matrix = timeline::optimize_table(built.matrix);
    set_progress(&pb, 4.0 / 5.0);
    timings.push(("optimize table", started.elapsed()));

    if let Some(path) = &csv {
        let mut buffer = Vec::new();
        let written = match write_matrix_csv(&mut buffer, &matrix) {
            Ok(()) => async_fs::write(path, buffer).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(e) = written {
            pb.finish_and_clear();
            error!("Cannot write table to {}: {}", path.display(), e);
        }
    }

    pb.set_message("Creating animation... (this may take a while)");
    let started = Instant::now();
    let renderer = match CommandRenderer::from_env() {
        Ok(renderer) => renderer,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    let layout = RenderLayout::new(utils::chart_title(&run), built.label_width, &matrix);
    let video = match renderer.render(&matrix, &layout).await {
        Ok(video) => video,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    set_progress(&pb, 1.0);
    timings.push(("render", started.elapsed()));

    let output = output.unwrap_or_else(|| PathBuf::from(utils::default_output_name(&run)));
    if let Err(e) = async_fs::write(&output, &video).await {
        pb.finish_and_clear();
        error!("Cannot write video to {}: {}", output.display(), e);
    }
    pb.finish_and_clear();

    for (stage, elapsed) in timings {
        info!("{}: {:.2}s", stage, elapsed.as_secs_f64());
    }
    info!(
        "{} scrobbles, {} days, {} entities on the chart",
        pages.iter().map(|p| p.tracks().len()).sum::<usize>(),
        matrix.dates().len(),
        matrix.entities().len()
    );
    if let Some(path) = csv {
        success!("Saved table to {}", path.display());
    }
    success!("Saved timelapse to {}", output.display());
}
