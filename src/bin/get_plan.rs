use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Print a previously generated care plan", long_about = None)]
struct Args {
    /// Identifier the plan was stored under
    #[arg(long)]
    uid: String,

    /// Plan directory (defaults to FRAIL_PLAN_DIR or the deployment path)
    #[arg(long)]
    dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let dir = args.dir.unwrap_or_else(frailcare::config::plan_dir_from_env);
    let plan = frailcare::plans::read_plan(&dir, &args.uid)?;
    println!("{plan}");
    Ok(())
}
