//! `--list-cases`: the case selectors and what each leaves on disk.

use crate::{
    case::{CaseNumber, TIME_FILE},
    printer::TextPrinter,
};

pub struct CasesHandler;

impl CasesHandler {
    pub fn run(printer: &TextPrinter) {
        printer.heading("case  computes");
        for case in CaseNumber::ALL {
            let files: Vec<&str> = case.outputs().iter().map(|o| o.file_name()).collect();
            let files = if files.is_empty() {
                "(no time series)".to_string()
            } else {
                format!("{} {}", TIME_FILE, files.join(" "))
            };
            printer.line(&format!("{:>4}  {}\n      -> {}", case.get(), case.describe(), files));
        }
    }
}
