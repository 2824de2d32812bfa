use std::fs::{self, File};
use std::path::PathBuf;

use serde::Deserialize;
use variance_band::api::{ClearReason, UpdateOptions, UpdateOutcome, VarianceChart};
use variance_band::core::Viewport;
use variance_band::data::DataTable;
use variance_band::interaction::SelectionBehavior;
use variance_band::model::StaticPalette;
use variance_band::render::{CairoRenderer, PangoTextMeasurer};

const DEFAULT_OUTPUT_PATH: &str = "variance_band.png";

/// Render request read from disk: the host payload plus the target size.
#[derive(Debug, Deserialize)]
struct RenderRequest {
    viewport: Viewport,
    data: DataTable,
    #[serde(default)]
    palette_color: Option<String>,
}

#[derive(Debug)]
struct CliArgs {
    input_path: PathBuf,
    output_path: PathBuf,
}

fn main() {
    let _ = variance_band::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.input_path).map_err(|err| {
        format!(
            "failed to read request `{}`: {err}",
            args.input_path.display()
        )
    })?;
    let request: RenderRequest = serde_json::from_str(&raw).map_err(|err| {
        format!(
            "failed to parse request `{}`: {err}",
            args.input_path.display()
        )
    })?;

    let viewport = request.viewport;
    let width = i32::try_from(viewport.width)
        .map_err(|_| "viewport width overflows i32".to_owned())?;
    let height = i32::try_from(viewport.height)
        .map_err(|_| "viewport height overflows i32".to_owned())?;
    let renderer =
        CairoRenderer::new(width, height).map_err(|err| format!("renderer init failed: {err}"))?;
    let measurer =
        PangoTextMeasurer::new().map_err(|err| format!("text measurer init failed: {err}"))?;
    let palette = request
        .palette_color
        .map_or_else(StaticPalette::default, |color| StaticPalette { color });

    let mut chart =
        VarianceChart::with_parts(renderer, palette, measurer, SelectionBehavior::default());
    match chart.update(&UpdateOptions::new(request.data, viewport)) {
        UpdateOutcome::Rendered => {}
        UpdateOutcome::Cleared(reason) => {
            eprintln!("warning: chart cleared ({})", describe(reason));
        }
    }

    if let Some(parent) = args.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!("failed to create output dir `{}`: {err}", parent.display())
            })?;
        }
    }
    let mut file = File::create(&args.output_path).map_err(|err| {
        format!(
            "failed to create png `{}`: {err}",
            args.output_path.display()
        )
    })?;
    chart
        .renderer()
        .write_png(&mut file)
        .map_err(|err| format!("failed to write png `{}`: {err}", args.output_path.display()))?;

    println!("rendered {}", args.output_path.display());
    Ok(())
}

fn describe(reason: ClearReason) -> &'static str {
    match reason {
        ClearReason::NoData => "no data",
        ClearReason::InsufficientData => "category and both central roles are required",
        ClearReason::ViewportTooSmall => "viewport below minimum size",
        ClearReason::UnexpectedFailure => "layout or paint failed",
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut input_path: Option<PathBuf> = None;
    let mut output_path = PathBuf::from(DEFAULT_OUTPUT_PATH);

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input_path = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = PathBuf::from(value);
            }
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    let input_path =
        input_path.ok_or_else(|| format!("missing --input\n\n{}", usage_message()))?;
    Ok(CliArgs {
        input_path,
        output_path,
    })
}

fn usage_message() -> String {
    format!(
        "Usage: cargo run --features cairo-backend --bin variance-band-png -- --input <request.json> [options]\n\nOptions:\n  --input <path>    Render request with `viewport` and `data`\n  --output <path>   PNG output path (default: {DEFAULT_OUTPUT_PATH})\n  -h, --help        Show this message"
    )
}
