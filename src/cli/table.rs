use chrono::Local;
use tabled::Table;

use super::{RunArgs, collect_pages, progress_bar, resolve_run};
use crate::{
    error, info, timeline,
    types::StandingTableRow,
    warning,
};

/// Builds the pruned table of a run and prints the standings of its last day.
pub async fn table(args: RunArgs) {
    let run = match resolve_run(&args, Local::now().date_naive()).await {
        Ok(run) => run,
        Err(e) => error!("{}", e),
    };

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

    let built = match timeline::build_table(&pages, run.chart_type) {
        Ok(built) => built,
        Err(e) => error!("{}", e),
    };
    let matrix = timeline::optimize_table(built.matrix);

    let standings = matrix.final_standings();
    let top = timeline::TOP_ENTITIES;
    if let (Some(tenth), Some(next)) = (standings.get(top - 1), standings.get(top)) {
        if tenth.1 == next.1 {
            let tied = standings.iter().filter(|(_, plays)| *plays == tenth.1).count();
            warning!(
                "{} entries share {} plays at rank {}, only the first {} are listed",
                tied,
                tenth.1,
                top,
                top
            );
        }
    }

    let rows: Vec<StandingTableRow> = standings
        .into_iter()
        .take(top)
        .enumerate()
        .map(|(i, (name, plays))| StandingTableRow {
            rank: i + 1,
            name: name.replace('\n', " - "),
            plays,
        })
        .collect();

    if let (Some(first), Some(last)) = (matrix.dates().first(), matrix.dates().last()) {
        info!(
            "{user}'s top {chart} from {first} to {last}",
            user = run.username,
            chart = run.chart_type,
            first = first,
            last = last
        );
    }
    println!("{}", Table::new(rows));
}
