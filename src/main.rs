use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use posterkit::{EditTarget, EditorConfig, GuestTextField, Studio, TextTarget};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "posterkit", version, about = "Headless poster editor and export engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Png,
    Pdf,
    Both,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a poster, apply optional edits, and export it
    Export {
        /// Artifact format to produce
        #[arg(long, value_enum, default_value_t = Format::Both)]
        format: Format,
        /// Directory the artifacts are written to
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Export quality multiplier
        #[arg(long, default_value_t = 4)]
        scale: u32,
        /// Replace the headline title before exporting
        #[arg(long)]
        title: Option<String>,
        /// Grow or shrink the guest grid to this count (0-9)
        #[arg(long)]
        guests: Option<usize>,
        /// Use this image file as the poster background
        #[arg(long)]
        poster_image: Option<PathBuf>,
    },
    /// Print the seeded document as JSON
    Dump,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            format,
            out,
            scale,
            title,
            guests,
            poster_image,
        } => export(format, out, scale, title, guests, poster_image).await,
        Commands::Dump => dump().await,
    }
}

async fn export(
    format: Format,
    out: PathBuf,
    scale: u32,
    title: Option<String>,
    guests: Option<usize>,
    poster_image: Option<PathBuf>,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(&out)
        .with_context(|| format!("creating output directory {}", out.display()))?;

    let config = EditorConfig {
        export_scale: scale,
        ..Default::default()
    };
    let studio = Studio::new(Some(config)).await?;
    let session = studio.session();

    if let Some(title) = title {
        session
            .commit_text(TextTarget::Field("title".into()), title)
            .await?;
    }

    if let Some(target) = guests {
        let mut count = session.snapshot().await?.guest_count();
        while count < target {
            session.add_guest().await.context("growing guest grid")?;
            count += 1;
        }
        while count > target {
            session.remove_guest().await?;
            count -= 1;
        }
    }

    if let Some(path) = poster_image {
        session.begin_image_edit(EditTarget::Poster).await?;
        session
            .pick_image(path.clone())
            .await
            .with_context(|| format!("ingesting {}", path.display()))?;
    }

    if matches!(format, Format::Png | Format::Both) {
        match session.export_png(Some(out.clone())).await? {
            Some(artifact) => println!(
                "wrote {} ({} bytes)",
                out.join(&artifact.file_name).display(),
                artifact.bytes.len()
            ),
            None => println!("no surface mounted; nothing exported"),
        }
    }
    if matches!(format, Format::Pdf | Format::Both) {
        match session.export_pdf(Some(out.clone())).await? {
            Some(artifact) => println!(
                "wrote {} ({} bytes)",
                out.join(&artifact.file_name).display(),
                artifact.bytes.len()
            ),
            None => println!("no surface mounted; nothing exported"),
        }
    }

    studio.close().await?;
    Ok(())
}

async fn dump() -> anyhow::Result<()> {
    let studio = Studio::new(None).await?;
    let session = studio.session();

    // Show a guest text commit going through the mediator path before dumping
    session
        .commit_text(
            TextTarget::Guest {
                id: 1,
                field: GuestTextField::Name,
            },
            "Sarah J.",
        )
        .await?;

    let document = session.snapshot().await?;
    println!("{}", serde_json::to_string_pretty(&document)?);

    studio.close().await?;
    Ok(())
}
