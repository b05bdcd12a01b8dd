//! # Boleta CLI
//!
//! Command-line interface for rendering and exporting receipts.
//!
//! ## Usage
//!
//! ```bash
//! # List available styles
//! boleta styles
//!
//! # Write the demo receipt as HTML and a PNG preview
//! boleta render --demo --html receipt.html --png receipt.png
//!
//! # Export a receipt described in JSON as an 80mm PDF
//! boleta pdf --input receipt.json --out-dir exports
//!
//! # Fresh receipt with items, thermal style, no QR code
//! boleta pdf --style thermal --items $'Coffee - 4.50\nBagel - 3.25' --no-qr
//!
//! # Spool the print document, or send it to a printer
//! boleta print --demo --spool spool/
//! boleta print --demo --printer Receipt_80mm
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use boleta::{
    BoletaError, PageConfig, ReceiptSession,
    qr::{PayloadKind, QrConfig},
    receipt::{ReceiptData, ReceiptField, ReceiptOptions, ReceiptStyle, sample_receipt},
    session::Notification,
    transport::{PrintSurface, SpoolDirectory, SystemPrinter},
};

/// Boleta - Styleable sales receipt renderer
#[derive(Parser, Debug)]
#[command(name = "boleta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List receipt styles
    Styles,

    /// Render a receipt as HTML and/or a PNG preview
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Write HTML markup to this file (stdout when no output is given)
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,

        /// Write a PNG preview to this file
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,
    },

    /// Export a receipt as an 80mm PDF
    Pdf {
        #[command(flatten)]
        input: InputArgs,

        /// Directory for receipt-<transactionId>.pdf
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Send the print document to a spool directory or printer
    Print {
        #[command(flatten)]
        input: InputArgs,

        /// Write the print document into this directory instead of printing
        #[arg(long, value_name = "DIR", conflicts_with = "printer")]
        spool: Option<PathBuf>,

        /// Printer destination passed to `lp -d` (system default when omitted)
        #[arg(long)]
        printer: Option<String>,
    },
}

/// Where the receipt comes from and how it is presented.
#[derive(Args, Debug)]
struct InputArgs {
    /// Receipt record as JSON
    #[arg(long, value_name = "FILE", conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Use the built-in sample receipt
    #[arg(long)]
    demo: bool,

    /// Receipt style (see `boleta styles`)
    #[arg(long)]
    style: Option<String>,

    /// Item lines to append, one `name - price` per line
    #[arg(long)]
    items: Option<String>,

    /// Leave out the QR code
    #[arg(long)]
    no_qr: bool,

    /// Include terms & conditions
    #[arg(long)]
    terms: bool,

    /// Leave out phone and email
    #[arg(long)]
    no_contact: bool,

    /// Plain store name instead of the brand banner
    #[arg(long)]
    no_logo: bool,

    /// Encode the whole record as JSON in the QR code
    #[arg(long)]
    full_qr: bool,

    /// Raster oversampling factor for PNG/PDF
    #[arg(long, default_value = "2")]
    scale: u32,
}

impl InputArgs {
    /// Build the session and bring its QR image up to date.
    async fn session(&self) -> Result<ReceiptSession, BoletaError> {
        let data = match (&self.input, self.demo) {
            (Some(path), _) => {
                let json = std::fs::read_to_string(path)?;
                serde_json::from_str::<ReceiptData>(&json)?
            }
            (None, true) => sample_receipt(),
            (None, false) => ReceiptData::new(),
        };

        let options = ReceiptOptions {
            include_qr: !self.no_qr,
            include_terms: self.terms,
            include_contact: !self.no_contact,
            include_logo: !self.no_logo,
        };
        let qr_config = QrConfig {
            payload: if self.full_qr { PayloadKind::Full } else { PayloadKind::Minimal },
            ..QrConfig::DEFAULT
        };

        let mut session = ReceiptSession::with_data(data)
            .with_options(options)
            .with_qr_config(qr_config)
            .with_page(PageConfig::RECEIPT_80MM.with_scale(self.scale));

        if let Some(style) = &self.style {
            let style: ReceiptStyle = style.parse()?;
            session.set_field(ReceiptField::Style, style.as_str());
        }
        if let Some(items) = &self.items {
            let added = session.add_items(items);
            tracing::debug!(added, "parsed item lines");
        }

        session.refresh_qr().await;
        Ok(session)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "boleta=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), BoletaError> {
    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(cli.command))
}

async fn dispatch(command: Commands) -> Result<(), BoletaError> {
    match command {
        Commands::Styles => {
            println!("Available styles:");
            for style in ReceiptStyle::ALL {
                println!("  {:<12} {}", style.as_str(), style.label());
            }
            Ok(())
        }

        Commands::Render { input, html, png } => {
            let session = input.session().await?;

            if html.is_none() && png.is_none() {
                println!("{}", session.markup());
                return Ok(());
            }
            if let Some(path) = html {
                std::fs::write(&path, session.markup())?;
                println!("Saved HTML to {}", path.display());
            }
            if let Some(path) = png {
                std::fs::write(&path, session.png()?)?;
                println!("Saved preview to {}", path.display());
            }
            Ok(())
        }

        Commands::Pdf { input, out_dir } => {
            let session = input.session().await?;
            std::fs::create_dir_all(&out_dir)?;

            let result = session.export_pdf(&out_dir).await;
            report(Notification::for_export(&result));
            let path = result?;
            println!("{}", path.display());
            Ok(())
        }

        Commands::Print {
            input,
            spool,
            printer,
        } => {
            let session = input.session().await?;
            let mut surface: Box<dyn PrintSurface> = match spool {
                Some(dir) => Box::new(SpoolDirectory::new(dir)),
                None => Box::new(SystemPrinter::new(printer)),
            };

            let result = session.print(surface.as_mut());
            report(Notification::for_print(&result));
            result
        }
    }
}

fn report(notification: Notification) {
    if notification.is_error() {
        eprintln!("{}", notification);
    } else {
        println!("{}", notification);
    }
}
