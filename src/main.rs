use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    cisc0::cli::main()
}
