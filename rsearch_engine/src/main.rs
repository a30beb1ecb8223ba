
use rsearch_engine_lib::types::*;
use rsearch_engine_lib::explore::*;
use rsearch_engine_lib::options::EngineConfig;
use rsearch_engine_lib::tree::{self,TreeGame};

use std::time::Duration;

use chrono::{Datelike,Timelike};
use log::{info,LevelFilter};
use simplelog::*;

const DEFAULT_BUDGET_MS: u64 = 1000;

/// Usage: rsearch_engine [TREE.json|-] [BUDGET_MS] [CONFIG.json]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger()?;

    let args: Vec<String> = std::env::args().collect();

    let mut g = match args.get(1).map(|s| s.as_str()) {
        Some("-") | None => tree::demo()?,
        Some(path)       => TreeGame::read_from_file(path)?,
    };

    let budget = match args.get(2) {
        Some(ms) => Duration::from_millis(ms.parse()?),
        None     => Duration::from_millis(DEFAULT_BUDGET_MS),
    };

    let cfg = match args.get(3) {
        Some(path) => EngineConfig::read_from_file(path)?,
        None       => EngineConfig::default(),
    };

    let mut ex = Explorer::try_new(cfg)?;

    info!("searching {} nodes, {:?} to move, budget {:?}",
          g.num_nodes(), g.side_to_move(), budget);

    let timer = Timer::new(budget, ex.cfg.time_growth_factor);
    match ex.iterative_deepening(&mut g, &timer) {
        Some(res) => {
            let pv: Vec<String> = res.pv.iter().map(|mv| format!("{}", mv)).collect();
            println!("bestmove {} score {} depth {}", res.mv, res.score, res.depth);
            println!("pv {}", pv.join(" "));
            println!("nodes {} ({} qsearch), {:.3}s",
                     res.stats.total_nodes(), res.stats.qt_nodes, timer.elapsed().as_secs_f64());
        },
        None => println!("bestmove none"),
    }

    Ok(())
}

/// Logs to a timestamped file when RSEARCH_LOG_DIR is set, else to stderr
fn init_logger() -> std::io::Result<()> {
    let cfg = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build();

    match std::env::var("RSEARCH_LOG_DIR") {
        Ok(dir) => {
            let now = chrono::Local::now();
            let logpath = std::path::Path::new(&dir).join(format!(
                "log{:0>4}-{:0>2}-{:0>2}_{:0>2}-{:0>2}-{:0>2}.log",
                now.year(), now.month(), now.day(),
                now.hour(), now.minute(), now.second()));
            let logfile = std::fs::OpenOptions::new()
                .truncate(true)
                .create(true)
                .write(true)
                .open(logpath)?;
            let _ = WriteLogger::init(LevelFilter::Debug, cfg, logfile);
        },
        Err(_) => {
            let _ = SimpleLogger::init(LevelFilter::Info, cfg);
        },
    }
    Ok(())
}
