//! cmdflags entry point: reads one JSON request from stdin.

use cmdflags::config::Config;
use cmdflags::flags::{join_for, splat, split};
use cmdflags::input::{Operation, Request};
use cmdflags::output::{ErrorResponse, Response, format_error, format_response};

use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    // Read JSON from stdin
    let mut input_str = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input_str) {
        return fail(ErrorResponse::new(format!("failed to read stdin: {e}")));
    }

    let request = match Request::parse(&input_str) {
        Ok(v) => v,
        Err(e) => return fail(ErrorResponse::new(e)),
    };

    let operation = match request.operation() {
        Ok(op) => op,
        Err(e) => return fail(ErrorResponse::new(e)),
    };

    let cwd = request.cwd.as_deref().map(Path::new);
    let config = match Config::load(cwd) {
        Ok(c) => c,
        Err(e) => return fail(ErrorResponse::new(e)),
    };

    let response = match operation {
        Operation::Split(input) => Response::args(split(&input.command)),
        Operation::Join(input) => {
            let platform = input.platform.unwrap_or_else(|| config.platform());
            Response::command(join_for(platform, input.args.as_slice()))
        }
        Operation::Splat(input) => {
            let object = input.object.with_defaults(&config.splat);
            match splat(&object, &input.options) {
                Ok(args) => Response::args(args),
                Err(e) => {
                    log::warn!("rejected splat request: {e}");
                    eprintln!("{}", format_error(&ErrorResponse::from(&e)));
                    return ExitCode::from(2);
                }
            }
        }
    };

    println!("{}", format_response(&response));
    ExitCode::SUCCESS
}

fn fail(error: ErrorResponse) -> ExitCode {
    eprintln!("{}", format_error(&error));
    ExitCode::from(1)
}
