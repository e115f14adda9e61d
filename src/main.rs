extern crate riffio;

use riffio::{ids, ChunkNode, RiffOptions, RiffReader, Validation};
use std::fs::File;
use std::process;

fn print_tree(nodes: &[ChunkNode], depth: usize) {
    for node in nodes {
        let kind = if node.is_list() { "LIST " } else { "" };
        println!(
            "{:indent$}{}'{}' offset {} size {}",
            "",
            kind,
            ids::display(node.tag()),
            node.offset(),
            node.size(),
            indent = depth * 2
        );
        if let Some(list) = node.as_list() {
            print_tree(&list.chunks, depth + 1);
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let path = match args.get(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: riffio <file>");
            process::exit(2);
        }
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("unable to open {}: {}", path, e);
            process::exit(1);
        }
    };

    let options = RiffOptions {
        validation: Validation::Lenient,
        ..RiffOptions::default()
    };
    match RiffReader::with_options(seek_bufread::BufReader::new(file), options) {
        Ok(riff) => {
            println!("'{}'", ids::display(riff.magic()));
            print_tree(riff.chunks(), 1);
        }
        Err(e) => {
            eprintln!("failed to read {}: {}", path, e);
            process::exit(1);
        }
    }
}
