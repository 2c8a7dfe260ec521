use clap::{Parser, Subcommand};
use scv_barcode::tools::{inspect, load_image, parse_color, parse_points};
use scv_barcode::{Barcode, DecodedSymbol, Feature, LayeredImage, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "barcodetool", version, about = "Barcode feature geometry tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print centroid, edges and area for hand-labeled corner points
    Inspect {
        /// Corner points as "x,y;x,y;..."
        #[arg(long)]
        points: String,
        #[arg(long, default_value = "")]
        data: String,
    },
    /// Draw the feature outline onto an image and save the result
    Draw {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        points: String,
        #[arg(long, default_value = "")]
        data: String,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value = "255,0,0")]
        color: String,
        /// Line width; negative fills the outline
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        width: i32,
    },
    /// Crop an image to the feature's bounding box
    Crop {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        points: String,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Inspect { points, data } => inspect_cmd(&points, data),
        Command::Draw {
            image,
            points,
            data,
            output,
            color,
            width,
        } => draw_cmd(&image, &points, data, &output, &color, width),
        Command::Crop {
            image,
            points,
            output,
        } => crop_cmd(&image, &points, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn inspect_cmd(points: &str, data: String) -> Result<()> {
    let report = inspect(parse_points(points)?, data)?;
    print!("{report}");
    Ok(())
}

fn feature_on<'img>(image: &'img LayeredImage, points: &str, data: String) -> Result<Barcode<'img>> {
    let location = parse_points(points)?;
    Barcode::new(image, DecodedSymbol::new(location, data))
}

fn draw_cmd(
    image: &Path,
    points: &str,
    data: String,
    output: &Path,
    color: &str,
    width: i32,
) -> Result<()> {
    let color = parse_color(color)?;
    let host = load_image(image)?;
    let code = feature_on(&host, points, data)?;

    code.draw(color, width);
    host.save_rendered(output)?;
    println!("{code}");
    println!("Wrote {}", output.display());
    Ok(())
}

fn crop_cmd(image: &Path, points: &str, output: &Path) -> Result<()> {
    let host = load_image(image)?;
    let code = feature_on(&host, points, String::new())?;

    let cropped = code.crop()?;
    cropped.pixels().save(output)?;
    println!(
        "Cropped {}x{} region to {}",
        cropped.width(),
        cropped.height(),
        output.display()
    );
    Ok(())
}
