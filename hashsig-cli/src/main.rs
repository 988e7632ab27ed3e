use std::fs;
use std::io;
use std::path::Path;
use std::time;

use bincode;
use clap;
use memmap;

use hashsig::{Options, Signature};

// `.sig` is how this tool recognizes a previously-written signature file
// instead of a source file to re-hash.
const SIG_EXTENSION: &str = "sig";

fn main() {
    let matches = clap::App::new("hashsig")
        .version("1.0")
        .about("Computes and compares similarity signatures for byte streams")
        .subcommand(
            clap::SubCommand::with_name("sign")
                .about("Computes a similarity signature for a file")
                .arg(
                    clap::Arg::with_name("file")
                        .value_name("FILE")
                        .help("The file to hash")
                        .required(true),
                )
                .arg(
                    clap::Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("OUT")
                        .help("Where to write the signature (default: FILE.sig)")
                        .takes_value(true),
                )
                .arg(
                    clap::Arg::with_name("ignore-whitespace")
                        .long("ignore-whitespace")
                        .help("Drop every ASCII whitespace byte before hashing")
                        .conflicts_with("smart-whitespace"),
                )
                .arg(
                    clap::Arg::with_name("smart-whitespace")
                        .long("smart-whitespace")
                        .help("Collapse CR and runs of whitespace after a newline")
                        .conflicts_with("ignore-whitespace"),
                ),
        )
        .subcommand(
            clap::SubCommand::with_name("compare")
                .about("Compares two files or .sig signatures")
                .arg(
                    clap::Arg::with_name("a")
                        .value_name("A")
                        .help("First file or .sig")
                        .required(true),
                )
                .arg(
                    clap::Arg::with_name("b")
                        .value_name("B")
                        .help("Second file or .sig")
                        .required(true),
                )
                .arg(
                    clap::Arg::with_name("ignore-whitespace")
                        .long("ignore-whitespace")
                        .help("Drop every ASCII whitespace byte before hashing")
                        .conflicts_with("smart-whitespace"),
                )
                .arg(
                    clap::Arg::with_name("smart-whitespace")
                        .long("smart-whitespace")
                        .help("Collapse CR and runs of whitespace after a newline")
                        .conflicts_with("ignore-whitespace"),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("sign", Some(sub)) => run_sign(sub),
        ("compare", Some(sub)) => run_compare(sub),
        _ => {
            eprintln!("no subcommand given; run with --help for usage");
            std::process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}

fn options_from_matches(matches: &clap::ArgMatches) -> Options {
    if matches.is_present("ignore-whitespace") {
        Options::IGNORE_WHITESPACE
    } else if matches.is_present("smart-whitespace") {
        Options::SMART_WHITESPACE
    } else {
        Options::NORMAL
    }
}

fn run_sign(matches: &clap::ArgMatches) -> Result<(), String> {
    let started = time::Instant::now();
    let path = Path::new(matches.value_of("file").unwrap());
    let options = options_from_matches(matches);

    let signature = hash_file(path, options)?;

    let out_path = match matches.value_of("output") {
        Some(out) => out.to_string(),
        None => format!("{}.{}", path.display(), SIG_EXTENSION),
    };
    write_signature(Path::new(&out_path), &signature)?;

    println!(
        "wrote {} ({} sample(s) considered, {}s elapsed)",
        out_path,
        signature.considered(),
        started.elapsed().as_secs()
    );
    Ok(())
}

fn run_compare(matches: &clap::ArgMatches) -> Result<(), String> {
    let options = options_from_matches(matches);

    let a = load_or_hash(Path::new(matches.value_of("a").unwrap()), options)?;
    let b = load_or_hash(Path::new(matches.value_of("b").unwrap()), options)?;

    println!("{}", hashsig::compare(&a, &b));
    Ok(())
}

// Loads a `.sig` file as-is, or hashes the file if it isn't one.
fn load_or_hash(path: &Path, options: Options) -> Result<Signature, String> {
    if path.extension().and_then(|ext| ext.to_str()) == Some(SIG_EXTENSION) {
        read_signature(path)
    } else {
        hash_file(path, options)
    }
}

// Mmaps the file and hashes it as one buffer -- the same approach
// `test_chunks` used to scan files for chunking, now repurposed for
// similarity hashing. Falls back to a plain read for zero-length files,
// which cannot be mmapped.
fn hash_file(path: &Path, options: Options) -> Result<Signature, String> {
    let file = fs::File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let len = file
        .metadata()
        .map_err(|e| format!("{}: {}", path.display(), e))?
        .len();

    if len == 0 {
        return hashsig::signature_from_bytes(&[], options)
            .map_err(|e| format!("{}: {}", path.display(), e));
    }

    let mmap = unsafe { memmap::Mmap::map(&file) }.map_err(|e| format!("{}: {}", path.display(), e))?;
    hashsig::signature_from_bytes(&mmap, options).map_err(|e| format!("{}: {}", path.display(), e))
}

fn write_signature(path: &Path, signature: &Signature) -> Result<(), String> {
    let file = fs::File::create(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    bincode::serialize_into(io::BufWriter::new(file), signature)
        .map_err(|e| format!("{}: {}", path.display(), e))
}

fn read_signature(path: &Path) -> Result<Signature, String> {
    let file = fs::File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    bincode::deserialize_from(io::BufReader::new(file)).map_err(|e| format!("{}: {}", path.display(), e))
}
