// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use anyhow::Result;

pub struct Args {
    pub replay: Option<String>,
    pub config: Option<String>,
    pub show_all_debug: bool,
    pub write_logs_to_file: bool,
}

impl Args {
    /// Parse the arguments
    ///
    /// # Errors
    /// Will return an error if the arguments are invalid
    pub fn parse<It: Iterator<Item = String>>(mut it: It) -> Result<Self> {
        trace!("Parsing args");

        let program_name = it.next();
        let mut replay = None;
        let mut config = None;
        let mut error = false;
        let mut show_all_debug = false;
        #[cfg(debug_assertions)]
        let mut write_logs_to_file = true;
        #[cfg(not(debug_assertions))]
        let mut write_logs_to_file = false;

        while let Some(arg) = it.next() {
            match arg {
                arg if arg.as_str() == "--replay" => {
                    replay = it.next().map_or_else(
                        || {
                            println!("Missing argument for --replay");
                            Self::help(program_name.as_deref());
                            error = true;
                            None
                        },
                        Some,
                    );
                }
                arg if arg.as_str() == "--config" => {
                    config = it.next().map_or_else(
                        || {
                            println!("Missing argument for --config");
                            Self::help(program_name.as_deref());
                            error = true;
                            None
                        },
                        Some,
                    );
                }
                arg if arg.as_str() == "--help" => Self::help(program_name.as_deref()),
                arg if arg.as_str() == "--show-all-debug" => show_all_debug = true,
                arg if arg.as_str().contains("--write-logs-to-file") => {
                    let mut internal_error = false;
                    write_logs_to_file = arg.split('=').nth(1).map_or_else(
                        || {
                            println!("Missing argument for --write-logs-to-file");
                            Self::help(program_name.as_deref());
                            internal_error = true;
                            false
                        },
                        |val| {
                            val.parse().unwrap_or_else(|_| {
                                println!("Invalid argument for --write-logs-to-file");
                                Self::help(program_name.as_deref());
                                error = true;
                                false
                            })
                        },
                    );

                    if internal_error {
                        error = true;
                    }
                }
                _ => {
                    println!("Invalid argument {arg}");
                    Self::help(program_name.as_deref());
                    error = true;
                }
            }
        }

        if error {
            return Err(anyhow::anyhow!("Invalid arguments"));
        }

        Ok(Self {
            replay,
            config,
            show_all_debug,
            write_logs_to_file,
        })
    }

    fn help(program_name: Option<&str>) {
        let program_name = program_name.unwrap_or("panelterm");
        println!("Usage: {program_name} [OPTIONS]");
        println!();
        println!("Options:");
        println!("  --replay <path>               Feed a captured byte stream instead of the built-in exercise");
        println!("  --config <path>               Explicit config file path");
        println!("  --show-all-debug              Do not suppress noisy log targets");
        println!("  --write-logs-to-file=<bool>   Also write logs to a rolling file");
        println!("  --help                        Show this help");
    }
}
