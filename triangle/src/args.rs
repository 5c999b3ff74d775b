use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Draws a colored triangle in an OpenGL 3.2 core profile window")]
pub struct Args {
    /// Initial window width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,
    /// Initial window height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_size() {
        let args = Args::try_parse_from(["triangle"]).unwrap();

        assert_eq!(args.width, 800);
        assert_eq!(args.height, 600);
    }

    #[test]
    fn explicit_window_size() {
        let args = Args::try_parse_from(["triangle", "--width", "1280", "--height", "720"]).unwrap();

        assert_eq!(args.width, 1280);
        assert_eq!(args.height, 720);
    }
}
