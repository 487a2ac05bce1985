use crate::environment::Environment;
use crate::interpreter;
use crate::printer;
use crate::types::Value;
use ansi_term::Colour::Red;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::fs;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

pub fn setup() -> std::io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("htmlisp")?;
    interface.set_prompt("htmlisp> ")?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(".htmlisp_history");
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> std::io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

/// Run the REPL, or interpret a file when called with `-f <path>`.
pub fn launch(args: &[String], env: &Rc<Environment>) -> std::io::Result<()> {
    match args.iter().position(|arg| arg == "-f") {
        Some(pos) => match args.get(pos + 1) {
            Some(path) => interpret_file(path, env),
            None => {
                eprintln!("-f requires a file name");
                process::exit(2);
            }
        },
        None => repl(env),
    }
}

/// Read one line, evaluate it against the persistent environment, print the
/// result unless it is nil; loop until end of input, then exit non-zero.
pub fn repl(env: &Rc<Environment>) -> std::io::Result<()> {
    let interface = setup()?;
    loop {
        match interface.read_line()? {
            ReadResult::Eof => break,
            ReadResult::Signal(sig) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            ReadResult::Input(line) => {
                interface.add_history_unique(line.clone());
                match interpreter::rep(&line, env) {
                    Ok(Value::Nil) => {}
                    Ok(value) => {
                        writeln!(interface, "{}", printer::pr_str(&value)).ok();
                    }
                    Err(e) => report_error(&e),
                }
            }
        }
    }
    save_history(&interface).ok();
    process::exit(1);
}

/// Split file contents into statements: newlines deleted, tabs widened, then
/// a naive split on ';'. A ';' inside an attribute value terminates its
/// statement early; known limitation.
pub fn split_statements(code: &str) -> Vec<String> {
    code.replace('\n', "")
        .replace('\t', " ")
        .split(';')
        .filter(|statement| !statement.trim().is_empty())
        .map(String::from)
        .collect()
}

/// Evaluate each statement of the file against the same persistent
/// environment. The first error is printed and terminates the process with a
/// non-zero status.
pub fn interpret_file(path: &str, env: &Rc<Environment>) -> std::io::Result<()> {
    let code = fs::read_to_string(path)?;
    for statement in split_statements(&code) {
        match interpreter::rep(&statement, env) {
            Ok(Value::Nil) => {}
            Ok(value) => println!("{}", printer::pr_str(&value)),
            Err(e) => {
                report_error(&e);
                process::exit(1);
            }
        }
    }
    Ok(())
}

fn report_error(e: &interpreter::Error) {
    if atty::is(atty::Stream::Stderr) {
        eprintln!("{}", Red.paint(e.to_string()));
    } else {
        eprintln!("{}", e);
    }
}
