use mat_reader::{MatReader, NextElement};
use std::env;

/// Number of leading values printed per matrix.
const PREVIEW_LEN: usize = 10;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-mat-file> [--encoding <LABEL>]", args[0]);
        std::process::exit(1);
    }

    let mat_path = &args[1];
    let mut encoding: Option<&str> = None;
    // Parse --encoding argument
    if let Some(encoding_idx) = args.iter().position(|arg| arg == "--encoding") {
        match args.get(encoding_idx + 1) {
            Some(label) => encoding = Some(label.as_str()),
            None => {
                eprintln!("ERROR: --encoding flag requires an argument.");
                std::process::exit(1);
            }
        }
    }

    println!("Reading MAT-file: {}", mat_path);
    if let Some(label) = encoding {
        println!("Using text encoding: {}", label);
    }
    println!("{}", "=".repeat(60));

    let mut reader = match MatReader::open(mat_path, encoding) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("\nERROR: Failed to open MAT-file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    match reader.read_header() {
        Ok(header) => {
            println!("\nFile Information:");
            println!("  Text: {}", header.text);
            println!("  Version: 0x{:04X}", header.version);
            println!("  Byte order: {:?}", header.endianness);
        }
        Err(e) => {
            eprintln!("\nERROR: Failed to read header");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }

    let mut matrices = 0;
    let mut skipped = 0;
    loop {
        match reader.read_next_element() {
            Ok(NextElement::Matrix(matrix)) => {
                matrices += 1;
                let dims: Vec<String> = matrix.dimensions().iter().map(|d| d.to_string()).collect();
                println!("\n  {} [{}] {:?}", matrix.name(), dims.join("x"), matrix.class());
                let preview: Vec<String> = matrix
                    .values()
                    .iter()
                    .take(PREVIEW_LEN)
                    .map(|v| v.to_string())
                    .collect();
                println!("    {}", preview.join(", "));
                if matrix.len() > PREVIEW_LEN {
                    println!("    ... and {} more", matrix.len() - PREVIEW_LEN);
                }
            }
            Ok(NextElement::Skipped(tag)) => {
                skipped += 1;
                println!("\n  (skipped {:?} element, {} bytes)", tag.kind, tag.byte_len);
            }
            Ok(NextElement::End) => break,
            Err(e) => {
                eprintln!("\nERROR: Failed to read element");
                eprintln!("  {}", e);
                std::process::exit(1);
            }
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Statistics:");
    println!("  Matrices: {}", matrices);
    println!("  Skipped elements: {}", skipped);
}
