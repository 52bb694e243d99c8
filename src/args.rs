use crate::errors::ThreadDumpError;
use crate::errors::ThreadDumpError::InputFileNotFound;
use clap::{Arg, Command};
use clap::{crate_authors, crate_description, crate_name, crate_version};
use std::path::Path;

fn command() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!("\n"))
        .about(crate_description!())
        .arg(
            Arg::new("inputFile")
                .help("thread dump text file (jstack, jcmd Thread.print, kill -3)")
                .long("inputFile")
                .short('i')
                .num_args(1)
                .required(true),
        )
        .arg(
            Arg::new("details")
                .help("print frames and locks of every thread")
                .long("details")
                .short('d')
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("report")
                .help("write the detailed report next to the input file")
                .long("report")
                .short('r')
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .help("additional JSON output in file")
                .long("json")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .help("debug info")
                .long("debug")
                .action(clap::ArgAction::SetTrue),
        )
}

pub fn get_args() -> Result<Args, ThreadDumpError> {
    let matches = command().get_matches();

    let input_file = matches
        .get_one::<String>("inputFile")
        .expect("impossible")
        .trim();
    if !Path::new(&input_file).is_file() {
        return Err(InputFileNotFound {
            name: input_file.to_string(),
        });
    }

    let args = Args {
        file_path: input_file.to_string(),
        details: matches.get_flag("details"),
        report_file: matches.get_flag("report"),
        json_output: matches.get_flag("json"),
        debug: matches.get_flag("debug"),
    };
    Ok(args)
}

pub struct Args {
    pub file_path: String,
    pub details: bool,
    pub report_file: bool,
    pub json_output: bool,
    pub debug: bool,
}
