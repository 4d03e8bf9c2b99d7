use docopt::Docopt;
use log::LevelFilter;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use simple_logger::SimpleLogger;
use maze_explorer::{
    coordinates::Coordinate,
    generators,
    grid::Grid,
    pathing,
    traversal::Traversal,
    units::{ColumnsCount, RowsCount},
};
use std::{
    fs::File,
    io,
    io::prelude::*,
    process,
};

const USAGE: &str = "Maze explorer

Generates a maze carved out from the exit room, finds the path from the start room to the exit
and prints the maze with the path marked on it.

Usage:
    maze_driver [options] <exit-row> <exit-column> <start-row> <start-column> [<algorithm>]
    maze_driver -h | --help

Arguments:
    <algorithm>            Path finding algorithm, iterative or recursive. Defaults to iterative.

Options:
    -h --help              Show this screen.
    --rows=<n>             The number of rows in the grid [default: 20].
    --columns=<n>          The number of columns in the grid [default: 30].
    --generator=<alg>      Maze carving algorithm, iterative or recursive [default: iterative].
    --seed=<n>             Seed for the maze generator. Chosen at random and logged if not given.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    -v --verbose           Log debug messages to stderr.
    -q --quiet             Only log errors to stderr.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    arg_exit_row: String,
    arg_exit_column: String,
    arg_start_row: String,
    arg_start_column: String,
    arg_algorithm: Option<String>,
    flag_rows: usize,
    flag_columns: usize,
    flag_generator: String,
    flag_seed: Option<u64>,
    flag_save_edges: String,
    flag_verbose: bool,
    flag_quiet: bool,
}

/// Validated driver settings.
#[derive(Debug)]
struct MazeRun {
    rows: RowsCount,
    columns: ColumnsCount,
    exit: Coordinate,
    start: Coordinate,
    path_finder: Traversal,
    generator: Traversal,
    seed: u64,
}

mod errors {
    // Result is a typedef of std `Result` with the error type our own `Error`
    // Defines the From conversions that let ? work for our `Error`.
    // ResultExt adds the `chain_err` trait method.
    use error_chain::*;
    error_chain! {

        errors {
            InvalidArgument(reason: String) {
                description("invalid command line argument")
                display("{}", reason)
            }
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            LoggerInitFailure(::log::SetLoggerError);
        }
    }
}
use crate::errors::*;

fn main() {
    if let Err(ref e) = run() {
        match *e.kind() {
            ErrorKind::DocOptFailure(ref docopt_error) => docopt_error.exit(),
            ErrorKind::InvalidArgument(ref reason) => eprintln!("{}\n\n{}", reason, USAGE),
            _ => {
                eprintln!("Error: {}", e);
                for cause in e.iter().skip(1) {
                    eprintln!("Caused by: {}", cause);
                }
            }
        }
        process::exit(1);
    }
}

fn run() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    init_logging(&args)?;

    let maze_run = validate_args(&args)?;
    if args.flag_seed.is_none() {
        log::warn!("No --seed given, using --seed={}", maze_run.seed);
    }

    let mut rng = XorShiftRng::seed_from_u64(maze_run.seed);
    let mut maze_grid = generators::generate_with(maze_run.generator,
                                                  maze_run.rows,
                                                  maze_run.columns,
                                                  maze_run.exit,
                                                  &mut rng);
    if !maze_grid.is_perfect() {
        log::warn!("Generated maze is not a spanning tree: {:?}", maze_grid);
    }

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    let path = pathing::find_path_with(maze_run.path_finder,
                                       &maze_grid,
                                       maze_run.start,
                                       maze_run.exit);
    if path.is_empty() {
        // Only reachable if the generator failed to make a perfect maze
        log::error!("No path from {} to {}", maze_run.start, maze_run.exit);
    } else {
        pathing::mark_path(&mut maze_grid, &path);
    }

    println!("size: {}X{}", maze_run.rows, maze_run.columns);
    println!("exit: {}", maze_run.exit);
    println!("start: {}", maze_run.start);
    println!("algorithm: {}", maze_run.path_finder);
    if path.is_empty() {
        println!("path: none");
    } else {
        println!("path: {}", path);
    }
    println!("maze:");
    print!("{}", maze_grid);

    Ok(())
}

fn init_logging(args: &MazeArgs) -> Result<()> {
    let level = if args.flag_verbose {
        LevelFilter::Debug
    } else if args.flag_quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new()
        .without_timestamps()
        .with_level(level)
        .env()
        .init()?;
    Ok(())
}

/// Check every coordinate and algorithm name before anything is generated.
fn validate_args(args: &MazeArgs) -> Result<MazeRun> {

    if args.flag_rows == 0 || args.flag_columns == 0 {
        return Err(invalid(format!("the grid must have at least one row and column, got {}X{}",
                                   args.flag_rows,
                                   args.flag_columns)));
    }

    let exit = Coordinate::new(parse_index("EXIT_ROW", &args.arg_exit_row, args.flag_rows)?,
                               parse_index("EXIT_COLUMN", &args.arg_exit_column, args.flag_columns)?);
    let start = Coordinate::new(parse_index("START_ROW", &args.arg_start_row, args.flag_rows)?,
                                parse_index("START_COLUMN",
                                            &args.arg_start_column,
                                            args.flag_columns)?);

    let path_finder = match args.arg_algorithm {
        Some(ref name) => parse_traversal(name)?,
        None => Traversal::default(),
    };
    let generator = parse_traversal(&args.flag_generator)?;

    let seed = args.flag_seed.unwrap_or_else(|| rand::thread_rng().gen());

    Ok(MazeRun {
        rows: RowsCount(args.flag_rows),
        columns: ColumnsCount(args.flag_columns),
        exit,
        start,
        path_finder,
        generator,
        seed,
    })
}

fn parse_index(name: &str, value: &str, bound: usize) -> Result<usize> {
    let index = value.parse::<usize>()
        .map_err(|_| invalid(format!("{} must be a non-negative integer, got '{}'", name, value)))?;
    if index >= bound {
        return Err(invalid(format!("{} must be in 0..{}, got {}", name, bound - 1, index)));
    }
    Ok(index)
}

fn parse_traversal(name: &str) -> Result<Traversal> {
    name.parse::<Traversal>().map_err(|e| invalid(e.to_string()))
}

fn invalid(reason: String) -> Error {
    ErrorKind::InvalidArgument(reason).into()
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let vertices_count = maze_grid.size();
    let edges_count = maze_grid.links_count();
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(edges_count.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze_grid.iter_links() {
        let index_a = maze_grid
            .grid_coordinate_to_index(src)
            .expect("Links iter should give valid coordinate");
        let index_b = maze_grid
            .grid_coordinate_to_index(dst)
            .expect("Links iter should give valid coordinate");
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    log::info!("Saved {} maze links to {}", edges_count, file_path);
    Ok(())
}
