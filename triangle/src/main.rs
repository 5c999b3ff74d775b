use clap::Parser;

mod app;
mod args;
mod state;

use app::{App, AppError};
use args::Args;

fn main() {
    let args = <Args as Parser>::parse();

    let app = match App::new(&args) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{e}");
            let code = match e {
                AppError::LoaderFailed => -1,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    std::process::exit(app.run());
}
