use clap::{Parser, Subcommand};
use contact_sheet::{config, descriptor, output, render_folder, tensor::SheetTensor};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contact-sheet")]
#[command(about = "Render a folder of images into a single contact sheet")]
#[command(long_about = "\
Render a folder of images into a single contact sheet

Every .png .jpg .jpeg .gif .tiff .webp .bmp file becomes a 256x256
thumbnail with its name underneath. The sheet starts with an image count
and ends with the time it was created.

  photos/
  ├── contact-sheet.toml     # Optional config (overrides stock defaults)
  ├── beach.jpg
  └── trip/                  # With --recursive: its own titled section
      └── day1.png

Settings are layered: stock defaults, then contact-sheet.toml (or --config),
then command-line flags.

Run 'contact-sheet gen-config' to generate a documented contact-sheet.toml.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Flags for the render command. Unset flags fall back to the config file.
#[derive(clap::Args)]
struct RenderArgs {
    /// Folder to render
    folder: PathBuf,

    /// Thumbnails per row (1-20)
    #[arg(long)]
    per_row: Option<u32>,

    /// Include subfolders, one titled section per folder
    #[arg(long, overrides_with = "no_recursive")]
    recursive: bool,

    /// Only the folder itself, even if the config file enables subfolders
    #[arg(long, overrides_with = "recursive")]
    no_recursive: bool,

    /// Background color as #RRGGBB
    #[arg(long)]
    background: Option<String>,

    /// Text, divider, and padding color as #RRGGBB
    #[arg(long)]
    text_color: Option<String>,

    /// TrueType font file
    #[arg(long)]
    font: Option<PathBuf>,

    /// Config file to use instead of FOLDER/contact-sheet.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output image; the format follows the extension
    #[arg(long, short, default_value = "contact-sheet.png")]
    output: PathBuf,

    /// Also write the sheet as a float tensor in JSON
    #[arg(long)]
    tensor: Option<PathBuf>,
}

impl RenderArgs {
    /// Flags that were given, as the top config layer.
    fn overrides(&self) -> config::FlagOverrides {
        let include_subfolders = match (self.recursive, self.no_recursive) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        config::FlagOverrides {
            images_per_row: self.per_row,
            include_subfolders,
            background: self.background.clone(),
            text: self.text_color.clone(),
            font_path: self.font.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Render a folder into a contact sheet image
    Render(RenderArgs),
    /// Print the node descriptor as JSON
    Describe,
    /// Print a stock contact-sheet.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("contact_sheet=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => {
            let sheet_config =
                config::load_config(&args.folder, args.config.as_deref(), &args.overrides())?;
            init_thread_pool(&sheet_config.processing);

            let options = sheet_config.to_render_options(&args.folder)?;
            let sheet = render_folder(&options, &sheet_config.font.path)?;
            sheet.save(&args.output)?;

            if let Some(path) = &args.tensor {
                let tensor = SheetTensor::from_image(&sheet.image);
                std::fs::write(path, serde_json::to_string(&tensor)?)?;
            }
            output::print_render_summary(&sheet, &args.output);
        }
        Command::Describe => {
            println!("{}", descriptor::descriptor_json()?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Never more threads than available cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
