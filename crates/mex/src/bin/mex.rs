//! mex command-line interpreter.
//!
//! Usage:
//!   mex              Interactive prompt
//!   mex <file>       Evaluate a file line by line
//!   mex -e <code>    Evaluate a string
//!
//! At the prompt, lines starting with `@` are commands; everything
//! else is parsed, compiled, executed, and the resulting stack printed
//! top first.

use std::{
    env, fs,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use mex::{Callable, Engine};

const USAGE: &str = "\
Usage: mex [OPTIONS] [FILE]

Arguments:
  [FILE]  Expression file to evaluate line by line

Options:
  -e <CODE>  Evaluate CODE and print the result
  -h, --help Print this help message

With no arguments, starts an interactive prompt.";

const COMMANDS: &str = "\
@count     toggle parser argument counting
@countfun  toggle compiler argument counting
@reverse   toggle function argument reversal
@debug     toggle parser debug trace
@status    print flag values
@defun     define a new function
@list      list functions and operators
@vals      list variables and constants
@quit      quit";

enum Action {
    Repl,
    Eval(String),
    File(String),
    Help,
}

fn parse_args() -> Result<Action, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.as_slice() {
        [] => Ok(Action::Repl),
        [arg] if arg == "-h" || arg == "--help" => Ok(Action::Help),
        [flag, code] if flag == "-e" => Ok(Action::Eval(code.clone())),
        [file] => Ok(Action::File(file.clone())),
        _ => Err(USAGE.into()),
    }
}

fn main() -> ExitCode {
    match parse_args() {
        Ok(Action::Help) => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Action::Eval(code)) => {
            let mut engine = Engine::new();
            if eval_and_print(&mut engine, &code) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Ok(Action::File(file)) => match fs::read_to_string(&file) {
            Ok(source) => {
                let mut engine = Engine::new();
                for line in source.lines() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    if !eval_and_print(&mut engine, line) {
                        return ExitCode::FAILURE;
                    }
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error reading {file}: {e}");
                ExitCode::FAILURE
            }
        },
        Ok(Action::Repl) => repl(),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn eval_and_print(engine: &mut Engine, expr: &str) -> bool {
    match engine.eval(expr) {
        Ok(stack) => {
            print_stack(&stack);
            true
        }
        Err(e) => {
            eprintln!("{e}");
            false
        }
    }
}

fn print_stack(stack: &[f64]) {
    if stack.is_empty() {
        return;
    }
    let rendered: Vec<String> = stack.iter().rev().map(|v| v.to_string()).collect();
    println!("{}", rendered.join(" "));
}

fn repl() -> ExitCode {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut engine = Engine::new();

    println!("{COMMANDS}");
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }
        let Some(Ok(line)) = lines.next() else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('@') {
            match command {
                "quit" => break,
                "count" => {
                    let flag = !engine.parser().count_args();
                    engine.parser_mut().set_count_args(flag);
                }
                "countfun" => {
                    let flag = !engine.compiler().count_args();
                    engine.compiler_mut().set_count_args(flag);
                }
                "reverse" => {
                    let flag = !engine.parser().swap_args();
                    engine.parser_mut().set_swap_args(flag);
                }
                "debug" => {
                    let flag = !engine.parser().debug();
                    engine.parser_mut().set_debug(flag);
                }
                "status" => print_status(&engine),
                "defun" => {
                    if let Err(e) = define_function(&mut engine, &mut lines) {
                        eprintln!("{e}");
                    }
                }
                "list" => print_callables(&engine),
                "vals" => print_values(&engine),
                _ => {
                    println!("unknown command; valid commands:");
                    println!("{COMMANDS}");
                }
            }
            continue;
        }

        if eval_and_print(&mut engine, &line) && engine.parser().debug() {
            for entry in engine.parser().trace() {
                println!("  {entry}");
            }
        }
    }
    println!("bye");
    ExitCode::SUCCESS
}

fn print_status(engine: &Engine) {
    println!("reverse arguments   {}", engine.parser().swap_args());
    println!("count arguments     {}", engine.parser().count_args());
    println!("count fun arguments {}", engine.compiler().count_args());
    println!("debug               {}", engine.parser().debug());
}

/// Reads the `@defun` dialog: a header line `<out> <name> <params...>`
/// followed by the function body on the next line.
fn define_function<B: BufRead>(
    engine: &mut Engine,
    lines: &mut io::Lines<B>,
) -> Result<(), String> {
    println!("enter: <# of out values> <name> <parameters...>");
    println!("example: 1 hyp2 a b");
    let Some(Ok(header)) = lines.next() else {
        return Err("no function header".into());
    };
    let mut parts = header.split_whitespace();
    let out: usize = parts
        .next()
        .ok_or("missing output count")?
        .parse()
        .map_err(|_| "output count is not a number".to_string())?;
    let name = parts.next().ok_or("missing function name")?.to_string();
    let params: Vec<String> = parts.map(str::to_string).collect();

    println!("enter the function body:");
    let Some(Ok(body)) = lines.next() else {
        return Err("no function body".into());
    };
    engine
        .define_function(&name, &params, out, &body)
        .map_err(|e| e.to_string())
}

fn print_callables(engine: &Engine) {
    println!("functions");
    for f in engine.rte().functions() {
        println!(
            "  {}\tleft: {}\tright: {}\tout: {}",
            f.name(),
            f.lvalues_in(),
            f.rvalues_in(),
            f.values_out()
        );
    }
    println!("operators");
    for op in engine.parser().ops().iter() {
        println!(
            "  {}\tleft: {}\tright: {}\tout: {}\tswap: {}",
            op.name, op.largs, op.rargs, op.outvals, op.swap
        );
    }
}

fn print_values(engine: &Engine) {
    println!("variables");
    for v in engine.rte().variables() {
        println!("  {} = {}", v.name, v.val);
    }
    println!("constants");
    for c in engine.rte().constants() {
        println!("  {} = {}", c.name, c.val);
    }
}
