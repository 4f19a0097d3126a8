//! hrclock main entrypoint.

use hrclock::run;
use hrclock::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
