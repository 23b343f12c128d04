use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::{info, LevelFilter};
use matrix_engine::{io, utils, Matrix, MatrixError, Scalar, DEFAULT_EPSILON};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(
            env_logger::Env::default().filter_or("MATRIX_ENGINE_LOG", "error,matrix_engine=info"),
        )
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("demo", sub)) => demo(sub),
        Some(("inspect", sub)) => inspect(sub),
        Some(("random", sub)) => random(sub),
        Some(("solve", sub)) => solve(sub),
        _ => unreachable!("a subcommand is required"),
    }
}

fn cli() -> Command {
    let seed = Arg::new("seed")
        .long("seed")
        .help("Seed of the random generator. Random by default.")
        .value_parser(value_parser!(u64));

    Command::new("matrix-engine")
        .version(clap::crate_version!())
        .about("Dense matrix arithmetic and linear algebra")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("demo")
                .about("Walk through every matrix operation on small examples")
                .arg(seed.clone())
                .arg(
                    Arg::new("out")
                        .long("out")
                        .help("Where the save/load round trip writes its file")
                        .value_parser(value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Load a matrix from a text file and report its properties")
                .arg(
                    Arg::new("file")
                        .help("One row per line, entries separated by spaces")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("random")
                .about("Generate a random matrix")
                .arg(
                    Arg::new("rows")
                        .long("rows")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("cols")
                        .long("cols")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("min")
                        .long("min")
                        .help("Lower bound, 0 by default")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("max")
                        .long("max")
                        .help("Upper bound, 10 for integers and 1 for floats by default")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("float")
                        .long("float")
                        .help("Draw floats instead of integers")
                        .action(ArgAction::SetTrue),
                )
                .arg(seed)
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Also save the matrix to this file")
                        .value_parser(value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("solve")
                .about("Solve Ax = b, both read from text files")
                .arg(
                    Arg::new("a")
                        .help("Square coefficient matrix A")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("b")
                        .help("Column vector b")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn rng_from(matches: &ArgMatches) -> StdRng {
    match matches.get_one::<u64>("seed") {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_entropy(),
    }
}

fn load(path: &Path) -> Result<Matrix> {
    io::load_from_file(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn ints(lines: Vec<Vec<i64>>) -> Result<Matrix> {
    Ok(Matrix::new(
        lines
            .into_iter()
            .map(|l| l.into_iter().map(Scalar::from).collect())
            .collect(),
    )?)
}

fn section(title: &str) {
    println!("\n====================================");
    println!("  {}", title);
    println!("====================================");
}

fn demo(matches: &ArgMatches) -> Result<()> {
    let mut rng = rng_from(matches);
    let out = matches
        .get_one::<PathBuf>("out")
        .cloned()
        .unwrap_or_else(|| std::env::temp_dir().join("A_matrix.txt"));

    section("BASIC MATRIX CREATION");
    let a = ints(vec![vec![1, 2], vec![3, 4]])?;
    let b = ints(vec![vec![5, 6], vec![7, 8]])?;
    println!("\nMatrix A:\n{}", a);
    println!("\nMatrix B:\n{}", b);

    section("ADDITION, SUBTRACTION, MULTIPLICATION");
    println!("\nA + B:\n{}", (&a + &b)?);
    println!("\nA - B:\n{}", (&a - &b)?);
    println!("\nA * B:\n{}", (&a * &b)?);
    println!("\nA * 3 (scalar multiply):\n{}", &a * Scalar::from(3));

    section("TRANSPOSE");
    println!("\nA^T:\n{}", a.transpose());

    section("DETERMINANT & INVERSE");
    println!("\nDet(A): {}", a.det()?);
    println!("\nInverse of A:\n{}", a.inverse()?);

    section("RANDOM MATRICES");
    println!(
        "\nRandom integer matrix R:\n{}",
        utils::random_matrix(&mut rng, 3, 3, 0, 9)?
    );
    println!(
        "\nRandom float matrix (0-1):\n{}",
        utils::random_float_matrix(&mut rng, 3, 3, 0.0, 1.0)?
    );
    println!("\nRandom vector:\n{}", utils::random_vector(&mut rng, 4, 0, 10)?);

    section("SPECIAL MATRICES");
    let diagonal = utils::diagonal_matrix(&[Scalar::from(2), Scalar::from(5), Scalar::from(7)])?;
    println!("\nDiagonal matrix:\n{}", diagonal);
    println!(
        "\nScalar (4I) matrix:\n{}",
        utils::scalar_matrix(3, Scalar::from(4))?
    );

    section("CHECKS");
    println!("\nIs A square? {}", utils::is_square(&a));
    println!(
        "Is zero matrix? {}",
        utils::is_zero_matrix(&Matrix::<Scalar>::zeros(2, 2)?)
    );
    println!(
        "Is identity? {}",
        utils::is_identity(&Matrix::<Scalar>::identity(3)?, DEFAULT_EPSILON)
    );

    section("FILE SAVE/LOAD");
    io::save_to_file(&a, &out).with_context(|| format!("Failed to save {}", out.display()))?;
    println!("\nMatrix A saved to {}", out.display());
    println!("\nLoaded matrix A:\n{}", load(&out)?);

    section("CONVERSIONS");
    println!(
        "\nList -> Matrix:\n{}",
        utils::list_to_matrix(vec![
            vec![Scalar::from(9), Scalar::from(8)],
            vec![Scalar::from(7), Scalar::from(6)],
        ])?
    );
    let vec = ints(vec![vec![1], vec![2], vec![3]])?;
    let list: Vec<String> = utils::vector_to_list(&vec)?
        .iter()
        .map(|x| x.to_string())
        .collect();
    println!("\nVector -> List:\n[{}]", list.join(", "));

    section("CONCAT (HSTACK & VSTACK)");
    let a2 = ints(vec![vec![1, 1], vec![1, 1]])?;
    println!("\nHorizontal stack (A | A2):\n{}", utils::hstack(&a, &a2)?);
    println!("\nVertical stack:\n{}", utils::vstack(&a, &a2)?);

    section("GAUSS-JORDAN & SOLVE AX = b");
    let c = ints(vec![vec![2, 1], vec![5, 3]])?;
    let rhs = ints(vec![vec![1], vec![2]])?;
    println!("\nMatrix C:\n{}", c);
    println!("\nb vector:\n{}", rhs);
    println!("\nGauss-Jordan form of C:\n{}", c.gauss_jordan());
    println!("\nSolution to Cx = b:\n{}", c.solve(&rhs)?);

    section("RANK & TRACE");
    println!("\nRank of A: {}", a.rank());
    println!("Trace of A: {}", a.trace()?);

    section("SYMMETRY & ORTHOGONALITY");
    let sym = ints(vec![vec![1, 2], vec![2, 1]])?;
    println!("\nSymmetric matrix:\n{}", sym);
    println!("Is symmetric? {}", sym.is_symmetric());
    let q = ints(vec![vec![0, 1], vec![-1, 0]])?;
    println!("\nOrthogonal test matrix:\n{}", q);
    println!("Is orthogonal? {}", q.is_orthogonal());

    Ok(())
}

fn inspect(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<PathBuf>("file")
        .context("Missing matrix file")?;
    let a = load(path)?;
    info!("Inspecting {}", path.display());

    println!("{}\n", a);
    println!("shape: {}x{}", a.rows(), a.cols());
    println!("rank: {}", a.rank());
    if !a.is_square() {
        return Ok(());
    }

    println!("det: {}", a.det()?);
    println!("trace: {}", a.trace()?);
    println!("symmetric: {}", a.is_symmetric());
    println!("orthogonal: {}", a.is_orthogonal());
    match a.inverse() {
        Ok(inverse) => println!("inverse:\n{}", inverse),
        Err(MatrixError::Singular) => println!("inverse: none, the matrix is singular"),
        Err(error) => return Err(error.into()),
    }
    Ok(())
}

fn random(matches: &ArgMatches) -> Result<()> {
    let mut rng = rng_from(matches);
    let rows = *matches.get_one::<usize>("rows").context("Missing --rows")?;
    let cols = *matches.get_one::<usize>("cols").context("Missing --cols")?;
    let min = matches.get_one::<f64>("min").copied();
    let max = matches.get_one::<f64>("max").copied();

    let matrix = if matches.get_flag("float") {
        utils::random_float_matrix(&mut rng, rows, cols, min.unwrap_or(0.0), max.unwrap_or(1.0))?
    } else {
        let (min, max) = int_bounds(min.unwrap_or(0.0), max.unwrap_or(10.0))?;
        utils::random_matrix(&mut rng, rows, cols, min, max)?
    };

    println!("{}", matrix);
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        io::save_to_file(&matrix, output)
            .with_context(|| format!("Failed to save {}", output.display()))?;
        info!("Saved to {}", output.display());
    }
    Ok(())
}

// `i64::MAX as f64` rounds up to 2^63, which is already out of range
fn int_bounds(min: f64, max: f64) -> Result<(i64, i64)> {
    if min.fract() != 0.0 || max.fract() != 0.0 {
        bail!("Integer bounds expected, got {} and {} (use --float)", min, max);
    }
    let range = (i64::MIN as f64)..(i64::MAX as f64);
    if !range.contains(&min) || !range.contains(&max) {
        bail!("Integer bounds must fit in 64 bits, got {} and {}", min, max);
    }
    Ok((min as i64, max as i64))
}

fn solve(matches: &ArgMatches) -> Result<()> {
    let a = load(matches.get_one::<PathBuf>("a").context("Missing A")?)?;
    let b = load(matches.get_one::<PathBuf>("b").context("Missing b")?)?;
    let x = a.solve(&b).context("Cannot solve Ax = b")?;
    println!("{}", x);
    Ok(())
}
