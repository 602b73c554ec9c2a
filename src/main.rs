use std::fs;
use std::io::{self, Read, Write};
use std::process;

use serde_json::json;

use ifdef_preprocessor::{
    parse_define, parse_define_list, DirectiveMatcher, Environment, Options, Preprocessor,
    RenderMode,
};

const USAGE: &str = "\
Usage: ifdef-preprocessor [OPTIONS] [FILE]

Reads FILE (or stdin when FILE is `-` or absent), applies conditional
directives, and writes the transformed text to stdout.

Options:
  -o, --output FILE    write the result to FILE instead of stdout
  -D, --define NAME[=VALUE]
                       define a variable; VALUE parses as a JSON scalar,
                       plain text otherwise; bare NAME means true
      --no-env         do not seed variables from the process environment
      --double-slash   accept //#-style directives as well
      --pattern REGEX  custom directive pattern (needs a `token` group)
      --blank          blank out suppressed lines instead of commenting
      --marker STR     comment marker for suppressed lines (default `// `)
      --json           report diagnostics as JSON lines on stderr
  -v, --verbose        trace branch decisions
  -h, --help           show this help

Variables can also come from the IFDEF_DEFINES environment variable, a
shell-quoted list of NAME=VALUE specs applied before any -D flags.";

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut defines: Vec<(String, serde_json::Value)> = Vec::new();
    let mut use_process_env = true;
    let mut double_slash = false;
    let mut custom_pattern: Option<String> = None;
    let mut options = Options::default();
    let mut json_diagnostics = false;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            "-o" | "--output" => output = Some(take_value(&args, &mut i, arg)),
            "-D" | "--define" => {
                let spec = take_value(&args, &mut i, arg);
                defines.push(parse_define(&spec));
            }
            "--no-env" => use_process_env = false,
            "--double-slash" => double_slash = true,
            "--pattern" => custom_pattern = Some(take_value(&args, &mut i, arg)),
            "--blank" => options.render = RenderMode::Blank,
            "--marker" => options.comment_marker = take_value(&args, &mut i, arg),
            "--json" => json_diagnostics = true,
            "-v" | "--verbose" => options.verbose = true,
            _ if arg.starts_with('-') && arg.len() > 1 => {
                usage_error(&format!("unknown option `{}`", arg))
            }
            _ => {
                if input.is_some() {
                    usage_error("more than one input file");
                }
                input = Some(arg.to_string());
            }
        }
        i += 1;
    }

    let mut env = if use_process_env {
        Environment::from_process_env()
    } else {
        Environment::new()
    };
    if let Ok(spec) = std::env::var("IFDEF_DEFINES") {
        for (name, value) in parse_define_list(&spec) {
            env.define(name, value);
        }
    }
    for (name, value) in defines {
        env.define(name, value);
    }

    let verbose = options.verbose;
    let mut preprocessor = Preprocessor::with_options(env, options);
    if double_slash {
        preprocessor.set_matcher(DirectiveMatcher::double_slash());
    }
    if let Some(pattern) = custom_pattern {
        match DirectiveMatcher::from_pattern(&pattern) {
            Ok(matcher) => preprocessor.set_matcher(matcher),
            Err(err) => usage_error(&err.to_string()),
        }
    }

    let source = match input.as_deref() {
        Some("-") | None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => fs::read_to_string(path)?,
    };

    if verbose {
        eprintln!("📝 processing {} line(s)", source.split('\n').count());
    }

    match preprocessor.process(&source) {
        Ok(result) => {
            for warning in &result.warnings {
                if json_diagnostics {
                    if let Ok(line) = serde_json::to_string(warning) {
                        eprintln!("{}", line);
                    }
                } else {
                    eprintln!("⚠️  warning: {} (line {})", warning.message, warning.line);
                }
            }
            match output {
                Some(path) => fs::write(path, result.text)?,
                None => io::stdout().write_all(result.text.as_bytes())?,
            }
            Ok(())
        }
        Err(err) => {
            if json_diagnostics {
                let location = err.location();
                eprintln!(
                    "{}",
                    json!({
                        "severity": "error",
                        "message": err.to_string(),
                        "line": location.line,
                        "lineText": location.line_text,
                        "column": location.column,
                        "length": location.length,
                    })
                );
            } else {
                eprintln!("❌ error: {}", err);
                eprintln!("    {}", err.location().line_text);
            }
            process::exit(1);
        }
    }
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    match args.get(*i) {
        Some(value) => value.clone(),
        None => usage_error(&format!("`{}` needs a value", flag)),
    }
}

fn usage_error(message: &str) -> ! {
    eprintln!("error: {}", message);
    eprintln!("{}", USAGE);
    process::exit(2);
}
