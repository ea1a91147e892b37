use bytemaplib::{EncodeMode, MappingTable, Session, compile};
use std::env;
use std::path::{Path, PathBuf};
use std::process;

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");

    println!(" ----------------------------------------------");
    println!("|  Byte Mapping Utility  | v{version}              |");
    println!(" ----------------------------------------------");
    println!("\nUsage:");
    println!("  mapcli info <map.json>");
    println!("  mapcli encode <map.json> <input> <output> [--full]");
    println!("  mapcli decode <map.json> <input> <output>");
    println!("  mapcli merge <output.json> <input1.json> ... <inputN.json>");
    println!("  mapcli generate <input> <output.json> [--map <base.json>]");
    println!("\nOptions:");
    println!("  --full             Emit whole replacement sequences instead of their first byte");
    println!("  --map <path>       Mapping to extend with identity entries");
    println!("  --verbose          Print debug logs");
    println!("\nExamples:");
    println!("  mapcli info cipher.json");
    println!("  mapcli encode cipher.json letter.txt letter.bin");
    println!("  mapcli decode cipher.json letter.bin letter.txt");
    println!("  mapcli merge cipher.json base.json overrides.json");
    println!("  mapcli generate letter.txt cipher.json --map base.json");
}

fn main() {
    let verbose = env::args().any(|arg| arg == "--verbose");
    let args: Vec<String> = env::args().filter(|arg| arg != "--verbose").collect();

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    // Dispatch and immediately handle results
    if let Err(e) = run_dispatch(command, &args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run_dispatch(cmd: &str, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        "info" => {
            // Guard: Check args count
            let path_str = args.get(2).ok_or("Missing mapping file path")?;

            // Guard: File must exist
            let abs_path = validate_exists(path_str)?;

            run_info(&abs_path)
        }
        "encode" | "decode" => {
            // Guard: Check file path arguments given
            let map_path_str = args.get(2).ok_or("Missing mapping file path")?;
            let in_path_str = args.get(3).ok_or("Missing input path")?;
            let out_path_str = args.get(4).ok_or("Missing output path")?;

            // Guard: Check inputs exist
            let map_path = validate_exists(map_path_str)?;
            let in_path = validate_exists(in_path_str)?;
            let out_path = PathBuf::from(out_path_str);

            if cmd == "encode" {
                let mode = if args.iter().any(|arg| arg == "--full") {
                    EncodeMode::FullSequence
                } else {
                    EncodeMode::FirstByte
                };
                run_encode(&map_path, &in_path, &out_path, mode)
            } else {
                // Guard: --full only makes sense for encoding
                if args.iter().any(|arg| arg == "--full") {
                    return Err("Flag '--full' is only supported for encoding".into());
                }
                run_decode(&map_path, &in_path, &out_path)
            }
        }
        "merge" => {
            if args.len() < 5 {
                return Err(
                    "Usage: mapcli merge <output.json> <input1.json> ... <inputN.json>".into(),
                );
            }

            // Guard: Check output file path argument given
            let out_path_str = args.get(2).ok_or("Missing output path")?;
            let out_path = PathBuf::from(out_path_str);

            // Collect input file paths
            let mut inputs: Vec<PathBuf> = Vec::new();
            for arg in &args[3..] {
                if arg.starts_with("--") {
                    break; // stop at flags
                }
                inputs.push(validate_exists(arg)?);
            }

            run_merge(&inputs, &out_path)
        }
        "generate" => {
            let in_path_str = args.get(2).ok_or("Missing input path")?;
            let out_path_str = args.get(3).ok_or("Missing output path")?;

            let in_path = validate_exists(in_path_str)?;
            let out_path = PathBuf::from(out_path_str);

            // Optional base mapping
            let base_path = match get_flag_value(args, "--map") {
                Some(path_str) => Some(validate_exists(&path_str)?),
                None => None,
            };

            run_generate(&in_path, &out_path, base_path.as_deref())
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }
}

fn run_info(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let table = MappingTable::load(path)?;
    let tables = compile(&table);

    let multi_byte = table.iter().filter(|(_, seq)| seq.len() > 1).count();

    println!("File Path:    {}", path.display());
    println!("Entries:      {}", table.len());
    println!("Multi-byte:   {multi_byte}");
    println!("Collisions:   {}", tables.decode.collisions());

    let unreachable = tables.decode.unreachable();
    if !unreachable.is_empty() {
        let list: Vec<String> = unreachable.iter().map(|b| format!("0x{b:02X}")).collect();
        println!("Unreachable:  {}", list.join(", "));
    }
    Ok(())
}

fn run_encode(
    map_path: &Path,
    in_path: &Path,
    out_path: &Path,
    mode: EncodeMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::with_table(MappingTable::load(map_path)?);
    let text = std::fs::read(in_path)?;

    session.save_encoded(out_path, &text, mode)?;

    // Validate output file was written
    let out_abs_path = validate_exists(&out_path.to_string_lossy())?;

    println!(
        "Encoded {} -> {}",
        in_path.display(),
        out_abs_path.display()
    );
    Ok(())
}

fn run_decode(
    map_path: &Path,
    in_path: &Path,
    out_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::with_table(MappingTable::load(map_path)?);
    session.open_raw(in_path)?;

    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out_path, session.decoded())?;

    // Validate output file was written
    let out_abs_path = validate_exists(&out_path.to_string_lossy())?;

    println!(
        "Decoded {} -> {}",
        in_path.display(),
        out_abs_path.display()
    );
    Ok(())
}

fn run_merge(inputs: &[PathBuf], out_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut master = MappingTable::new();

    // Later inputs override earlier ones
    for path in inputs {
        master.merge(MappingTable::load(path)?);
    }

    master.save(out_path)?;

    // Validate output file was written
    let out_abs_path = validate_exists(&out_path.to_string_lossy())?;

    println!(
        "Merged {} entries into {}",
        master.len(),
        out_abs_path.display()
    );
    Ok(())
}

fn run_generate(
    in_path: &Path,
    out_path: &Path,
    base_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut table = match base_path {
        Some(path) => MappingTable::load(path)?,
        None => MappingTable::new(),
    };

    let text = std::fs::read(in_path)?;
    let inserted = table.ensure_defaults_for(&text);

    table.save(out_path)?;

    // Validate output file was written
    let out_abs_path = validate_exists(&out_path.to_string_lossy())?;

    println!(
        "Added {inserted} identity entries ({} total) -> {}",
        table.len(),
        out_abs_path.display()
    );
    Ok(())
}

// =============================== HELPER FUNCTIONS ===============================

/// Validate that a path exists and is a file. Returns absolute path.
fn validate_exists(path_str: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = PathBuf::from(path_str);
    if !path.exists() {
        return Err(format!("File not found: {path_str}").into());
    }
    if !path.is_file() {
        return Err(format!("Path is not a file: {path_str}").into());
    }
    // Return absolute path
    Ok(std::fs::canonicalize(path)?)
}

/// Find the value after a specific flag (e.g., "--map base.json")
fn get_flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}
