use htmlisp::{cmdline, environment};
use std::rc::Rc;

fn main() -> std::io::Result<()> {
    pretty_env_logger::init();
    // The root frame is owned here and threaded through every evaluation;
    // top-level define/set! mutate it for the life of the process.
    let env = Rc::new(environment::Environment::default());
    let args: Vec<String> = std::env::args().collect();
    cmdline::launch(&args, &env)
}
