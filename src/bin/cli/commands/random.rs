use anyhow::{bail, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let snapshot = app.snapshot();
    let Some(term) = snapshot.random_term(&mut rand::thread_rng()) else {
        bail!("Catalog is empty");
    };

    super::show::run(app, &term.id, format, use_color)
}
