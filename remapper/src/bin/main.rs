use std::{path::PathBuf, time::Instant};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use remapper::{
    jar::output_path_for, remap_jar, KrakatauRewriter, NameGenerator, RemapEvent, StageProgress,
};

/// Renames every class of a JAR to random Greek names
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input JAR, the result is written next to it as `<JAR_IN>-out.jar`
    jar_in: PathBuf,

    /// Seed for the name generator, for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("remapper {}", env!("CARGO_PKG_VERSION"));

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };

    if !args.jar_in.is_file() {
        println!("Input JAR not found: {}", args.jar_in.display());
        return Ok(());
    }

    let jar_out = output_path_for(&args.jar_in);
    let mut generator = match args.seed {
        Some(seed) => NameGenerator::with_seed(seed),
        None => NameGenerator::new(),
    };

    let bar = ProgressBar::new(100);
    bar.set_style(ProgressStyle::with_template(
        "{msg:24} [{wide_bar}] {percent:>3}%",
    )?);

    let now = Instant::now();
    let summary = remap_jar(
        &args.jar_in,
        &jar_out,
        &mut generator,
        &KrakatauRewriter,
        |event: RemapEvent| {
            bar.set_message(event.stage.as_str());
            match event.progress {
                StageProgress::Unknown => bar.set_position(0),
                StageProgress::Percentage(done) => bar.set_position((done * 100.0) as u64),
                StageProgress::Done => bar.set_position(100),
            }
        },
    )?;
    bar.finish_and_clear();

    println!("Done in {:?}: {}", now.elapsed(), jar_out.display());
    println!("  classes mapped:       {}", summary.classes_mapped);
    println!("  classes rewritten:    {}", summary.classes_rewritten);
    println!("  descriptors remapped: {}", summary.descriptors_remapped);
    println!("  copied:               {}", summary.copied);
    println!("  skipped:              {}", summary.skipped);

    Ok(())
}
