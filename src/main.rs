// Fri Oct 16 2026 - Alex

use sqlrecover::ui::{self, cli};

fn main() {
    if let Err(e) = cli::run() {
        ui::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
