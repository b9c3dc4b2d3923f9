use anyhow::{bail, Context, Result};
use clap::Parser;
use img_downsize::cli::{Args, Commands};
use img_downsize::utils::{calculate_compression_ratio, create_progress_spinner};
use img_downsize::{
    decode_selection, get_image_info, logger, print_image_info, report, CompressorConfig,
    DirectoryTarget, FileInput, SelectedFile, Session,
};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.quiet, args.verbose);

    match args.command {
        Commands::Compress { input, output_dir } => compress(&input, output_dir).await,
        Commands::Info { input } => show_image_info(&input),
    }
}

async fn compress(input: &Path, output_dir: PathBuf) -> Result<()> {
    report!("🗜️  Compressing image: {:?}", input);

    let file = SelectedFile::from_path(input)
        .with_context(|| format!("Cannot select {:?}", input))?;
    let original_size = file.size;

    // Every run is a fresh pick from the control. Clearing it first keeps the change event
    // firing even when the same file was chosen last time, so `choose` always yields here.
    let mut control = FileInput::new();
    control.click();
    let Some(file) = control.choose(file) else {
        return Ok(());
    };

    let mut session = Session::default();
    let pending = session.select(file);
    report!("📊 {}", session.size_info());

    if let Some(pending) = pending {
        report!("{}", session.status());
        let config = session.config();
        report!(
            "🎯 Re-encoding as {} at quality {} (max width {} px)",
            config.output_format,
            config.quality,
            config.max_width
        );

        let spinner = (!logger::is_quiet()).then(|| create_progress_spinner("Compressing..."));
        let completion = decode_selection(pending).await;
        session.finish_decode(completion);
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
    }

    if session.status().is_error() {
        bail!("{}", session.status());
    }
    let Some(result) = session.compressed() else {
        bail!("No compressed image was produced");
    };
    let ratio = calculate_compression_ratio(original_size, result.bytes.len() as u64);
    let (width, height) = (result.width, result.height);

    report!("{}", session.status());
    report!("📊 {}", session.size_info());
    report!("📏 Output dimensions: {}x{}", width, height);
    report!("🎯 Compression ratio: {:.1}%", ratio);

    let mut target = DirectoryTarget::new(output_dir);
    report!("📁 Output directory: {:?}", target.dir());
    let saved = session
        .download(&mut target)?
        .context("No compressed image to download")?;

    report!("{}", session.status());
    report!("📁 Output: {:?}", saved);
    Ok(())
}

fn show_image_info(input: &Path) -> Result<()> {
    report!("📋 Getting info for: {:?}", input);

    let config = CompressorConfig::default();
    let info = get_image_info(input, &config)?;
    print_image_info(&info, &config);
    Ok(())
}
