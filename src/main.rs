use clap::Parser;
use env_logger::Env;
use log::info;
use rayplay::{
    console::{write_report, Args},
    error::RpResult,
    SceneDocument,
};

fn main() -> RpResult<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    //parse CLI arguments
    let args = Args::parse();
    args.validate()?;

    //read scene from file
    info!("reading scene {}", args.file_path.display());
    let scene = SceneDocument::from_file(&args.file_path)?;

    //trace and report
    let report = scene.trace(args.trace_level)?;
    write_report(&report.to_yaml()?, args.output.as_deref())
}
