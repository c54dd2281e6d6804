//! Lumen CLI
//!
//! Renders a marked-up string to a PNG using system fonts, or measures it.
//!
//! Malformed markup is reported once on stderr and rendered as plain text,
//! unless `--strict` (or `LUMEN_STRICT_MARKUP=1`) turns it into an error.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use lumen_common::RenderConfig;
use lumen_markup::theme::TEXT_FOREGROUND;
use lumen_markup::{
    ColorValue, DEFAULT_FONT_SIZE, DisplayList, Font, LayoutPolicy, MarkupRenderer, Palette,
    RenderRequest, Theme, ThemeColors,
};
use lumen_raster::{FontSet, MeasureStrategy, metrics_and_canvas};
use owo_colors::OwoColorize;

/// Space between the canvas edge and the text box.
const PADDING: u32 = 4;

/// Lumen: render lightweight markup to an image
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Render a label
    lumen --markup '<b>Build</b> <font color=!error.foreground>failed</font>'

    # Truncate to 120 pixels
    lumen --markup '<html>A rather long list entry' --width 120 --policy truncate

    # Wrap a file's contents and print the height it needs
    lumen notes.txt --policy wrap --width 200 --measure

    # Dump the paint commands instead of rasterizing
    lumen --markup '<u>x</u>' --json
"#)]
struct Cli {
    /// File containing the markup
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Markup given directly instead of a file
    #[arg(long, value_name = "MARKUP")]
    markup: Option<String>,

    /// Canvas width in pixels
    #[arg(long, default_value = "320")]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "32")]
    height: u32,

    /// Base font size in pixels
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
    font_size: f32,

    /// Overflow handling: clip, truncate or wrap
    #[arg(long, default_value = "clip")]
    policy: LayoutPolicy,

    /// Base text color as six hex digits (default: the theme's text color)
    #[arg(long, value_parser = parse_color)]
    color: Option<ColorValue>,

    /// Background color as six hex digits (default: the theme's background)
    #[arg(long, value_parser = parse_color)]
    background: Option<ColorValue>,

    /// Color theme for `!key` colors and links: light or dark
    #[arg(long, default_value = "light")]
    theme: Theme,

    /// Treat malformed markup as an error
    #[arg(long)]
    strict: bool,

    /// Print the measured width (or height for wrap) instead of rendering
    #[arg(long)]
    measure: bool,

    /// Print the paint commands as JSON instead of rendering
    #[arg(long, conflicts_with = "measure")]
    json: bool,

    /// Width measurement: advances or kerned (default: platform)
    #[arg(long, value_name = "STRATEGY")]
    measure_strategy: Option<MeasureStrategy>,

    /// Font file to use instead of the system fonts
    #[arg(long, value_name = "FONT")]
    font: Option<PathBuf>,

    /// Output image (PNG)
    #[arg(short, long, default_value = "lumen.png")]
    output: PathBuf,
}

fn parse_color(value: &str) -> Result<ColorValue, String> {
    ColorValue::from_hex(value).ok_or_else(|| format!("'{value}' is not six hex digits"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let text = load_text(&cli)?;
    let config = if cli.strict {
        RenderConfig::strict()
    } else {
        RenderConfig::from_env()
    };

    let palette = cli.theme.palette();
    let background = cli.background.unwrap_or_else(|| cli.theme.background());
    let color = cli.color.unwrap_or_else(|| text_color(&palette));

    let fonts = match &cli.font {
        Some(path) => FontSet::from_file(path)?,
        None => FontSet::load_system(),
    };
    let strategy = cli
        .measure_strategy
        .unwrap_or_else(MeasureStrategy::for_platform);
    let (metrics, mut canvas) =
        metrics_and_canvas(&fonts, cli.width, cli.height, background, strategy);

    let renderer = MarkupRenderer::new(&metrics)
        .with_theme(&palette)
        .with_config(config);
    let request = build_request(&cli, &text, color, background);

    if cli.measure {
        let extent = renderer.measure(&request)?;
        let label = if cli.policy == LayoutPolicy::WordWrap {
            "height"
        } else {
            "width"
        };
        println!("{}: {extent:.1}", label.bold());
        return Ok(());
    }

    if cli.json {
        let mut list = DisplayList::new();
        let _ = renderer.render_multiline(&request, &mut list, None)?;
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    let extent = renderer.render_multiline(&request, &mut canvas, None)?;
    canvas.save(&cli.output)?;
    println!(
        "{} {} ({extent:.1}px)",
        "Saved".green(),
        cli.output.display()
    );
    Ok(())
}

/// The markup from `--markup` or the file argument.
fn load_text(cli: &Cli) -> Result<String> {
    if let Some(markup) = &cli.markup {
        Ok(markup.clone())
    } else if let Some(path) = &cli.path {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        Ok(text.trim_end_matches(['\r', '\n']).to_string())
    } else {
        bail!("nothing to render: pass a FILE or --markup")
    }
}

fn text_color(palette: &Palette) -> ColorValue {
    ThemeColors::color(palette, TEXT_FOREGROUND).unwrap_or(ColorValue::BLACK)
}

/// Place the text box inside the canvas padding, first baseline one font
/// size below the top.
fn build_request<'a>(
    cli: &Cli,
    text: &'a str,
    color: ColorValue,
    background: ColorValue,
) -> RenderRequest<'a> {
    let padding = f64::from(PADDING);
    let max_width = (f64::from(cli.width) - 2.0 * padding).max(0.0);
    let max_height = (f64::from(cli.height) - 2.0 * padding).max(0.0);
    RenderRequest::new(text)
        .font(Font::regular(cli.font_size))
        .color(color)
        .background(background)
        .policy(cli.policy)
        .at(padding, padding + f64::from(cli.font_size))
        .within(max_width, max_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ff0000"), Ok(ColorValue::rgb(255, 0, 0)));
        assert_eq!(parse_color("00ff00"), Ok(ColorValue::rgb(0, 255, 0)));
        assert!(parse_color("red").is_err());
    }

    #[test]
    fn test_arguments_parse() {
        let cli = Cli::try_parse_from([
            "lumen",
            "--markup",
            "<b>x</b>",
            "--policy",
            "wrap",
            "--theme",
            "dark",
            "--width",
            "100",
        ])
        .unwrap();
        assert_eq!(cli.policy, LayoutPolicy::WordWrap);
        assert_eq!(cli.theme, Theme::Dark);
        assert_eq!(load_text(&cli).unwrap(), "<b>x</b>");
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let cli = Cli::try_parse_from(["lumen"]).unwrap();
        assert!(load_text(&cli).is_err());
    }

    #[test]
    fn test_request_fits_inside_padding() {
        let cli = Cli::try_parse_from(["lumen", "--markup", "x", "--width", "100"]).unwrap();
        let request = build_request(&cli, "x", ColorValue::BLACK, ColorValue::WHITE);
        assert!((request.max_width - 92.0).abs() < 1e-9);
        assert!((request.x - 4.0).abs() < 1e-9);
    }
}
