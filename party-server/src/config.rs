//! Command-line configuration shared by server binaries.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use ephemeris::Ephemeris;
use skychart::{FontBook, StarChartRenderer};

use crate::routes::AppState;

/// Common command-line arguments for the star map server.
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(
        short = 'p',
        long,
        default_value = "5001",
        help = "HTTP server port",
        long_help = "TCP port for the HTTP server. The star map page will be available at \
            http://<bind_address>:<port>/starmap. Default: 5001."
    )]
    pub port: u16,

    #[arg(
        short = 'b',
        long,
        default_value = "0.0.0.0",
        help = "HTTP server bind address",
        long_help = "IP address to bind the HTTP server to. Use '0.0.0.0' to serve guests on \
            the local network, or '127.0.0.1' for localhost-only access."
    )]
    pub bind_address: String,

    #[arg(
        long = "font",
        value_name = "PATH",
        help = "Font file for chart text (repeatable, first usable wins)",
        long_help = "TrueType/OpenType font used for chart text. May be given several times; \
            the first file that loads is used. Defaults to DejaVu Sans, then FreeSans, then \
            whatever system fonts are installed."
    )]
    pub fonts: Vec<PathBuf>,

    #[arg(
        long,
        help = "Use J2000 catalog coordinates without precessing to the observation date"
    )]
    pub no_precession: bool,
}

impl ServerArgs {
    /// Socket address the server listens on.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .context("Invalid bind address")
    }

    /// Font book for the configured font files, or the shared default.
    pub fn font_book(&self) -> FontBook {
        if self.fonts.is_empty() {
            FontBook::shared().clone()
        } else {
            FontBook::load(self.fonts.as_slice())
        }
    }

    pub fn ephemeris(&self) -> Ephemeris {
        if self.no_precession {
            Ephemeris::without_precession()
        } else {
            Ephemeris::new()
        }
    }

    /// Immutable request state built from these arguments.
    pub fn app_state(&self) -> AppState {
        AppState {
            renderer: StarChartRenderer::with_fonts(self.font_book()),
            ephemeris: self.ephemeris(),
        }
    }
}
