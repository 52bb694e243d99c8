mod analyze;
mod args;
mod errors;
mod parser;
mod report;
mod utils;

use std::time::Instant;

use clap::{crate_name, crate_version};

use crate::analyze::{analyze_file, save_report};
use crate::args::Args;
use crate::args::get_args;
use crate::errors::ThreadDumpError;
use crate::report::json_report::JsonResult;
use crate::report::rendered_report::{RenderOptions, render};

fn main() {
    std::process::exit(match main_result() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    });
}

fn main_result() -> Result<(), ThreadDumpError> {
    let now = Instant::now();
    println!("\n{} {}\n", crate_name!(), crate_version!());
    let Args {
        file_path,
        details,
        report_file,
        json_output,
        debug,
    } = get_args()?;
    let dump = analyze_file(&file_path, debug)?;
    if json_output {
        let json_path = JsonResult::new(&dump).save_as_file()?;
        println!("Output JSON result file {json_path}");
    }

    // the report file always carries the details
    let options = RenderOptions {
        details: details || report_file,
    };
    let report = render(&dump, options);
    if report_file {
        let report_path = save_report(&file_path, &report)?;
        println!("Created report '{report_path}' for dump '{file_path}'");
    } else {
        print!("{report}");
    }
    println!("File successfully processed in {:?}", now.elapsed());
    Ok(())
}
