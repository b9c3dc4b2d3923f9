use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-downsize",
    about = "Downsize an image and re-encode it as a compact JPEG",
    long_about = "img-downsize shrinks an image to at most 1200 pixels wide, preserving its aspect \
                  ratio, and re-encodes it as JPEG at quality 0.7 regardless of the input \
                  format. \
                  The result is saved as <name>_compressed.jpeg.",
    version,
    after_help = "EXAMPLES:\n  \
    img-downsize compress holiday.png\n  \
    img-downsize compress scan.jpg -o ./compressed\n  \
    img-downsize info photo.webp"
)]
pub struct Args {
    #[arg(short = 'q', long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Print debug logging",
        long_help = "Print debug logging to stderr. RUST_LOG overrides this when set."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress a single image file",
        long_about = "Resize the image to the width cap and re-encode it as JPEG, then save it \
                      as <name>_compressed.jpeg in the output directory."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(
            short = 'o',
            long,
            default_value = ".",
            help = "Directory the compressed image is saved into"
        )]
        output_dir: PathBuf,
    },

    #[command(
        about = "Display image information and the compression plan",
        long_about = "Show dimensions, declared type and size of an image, and what compressing \
                      it would produce, without writing anything."
    )]
    Info {
        #[arg(help = "Image file path to analyze")]
        input: PathBuf,
    },
}
