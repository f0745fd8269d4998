extern crate fnv;
extern crate word_variants;

#[macro_use]
extern crate measure_time;

use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::process;

use word_variants::hasher::{Murmur3BuildHasher, Murmur3HashMap};
use word_variants::{tokenizer, WordTable};

fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| "words.txt".to_string());
    let words = match read_words(&path) {
        Ok(words) => words,
        Err(err) => {
            eprintln!("Error: could not read {}: {}", path, err);
            process::exit(1);
        }
    };
    println!("{} words from {}", words.len(), path);
    for _ in 0..2 {
        test_word_table(&words);
        test_fnv(&words);
        test_murmur3_std(&words);
        test_std(&words);
    }
}

fn read_words(path: &str) -> std::io::Result<Vec<String>> {
    let mut words = Vec::new();
    for line in BufReader::new(File::open(path)?).lines() {
        let line = line?;
        words.extend(tokenizer::words(&line).map(|word| word.to_owned()));
    }
    Ok(words)
}

fn test_word_table(words: &[String]) {
    let mut table = WordTable::new();
    {
        print_time!("word_table");
        for word in words {
            table.insert(word);
        }
    }
    println!("{:?}", table);
}

// The other maps only count, they do not track casing variants.
fn test_fnv(words: &[String]) {
    let mut map = fnv::FnvHashMap::default();
    {
        print_time!("FnvHashMap");
        for word in words {
            *map.entry(word.to_lowercase()).or_insert(0u32) += 1;
        }
    }
    println!("{:?}", map.len());
}

fn test_murmur3_std(words: &[String]) {
    let mut map: Murmur3HashMap<String, u32> =
        HashMap::with_hasher(Murmur3BuildHasher::default());
    {
        print_time!("std HashMap + murmur3");
        for word in words {
            *map.entry(word.to_lowercase()).or_insert(0) += 1;
        }
    }
    println!("{:?}", map.len());
}

fn test_std(words: &[String]) {
    let mut map = HashMap::new();
    {
        print_time!("std HashMap");
        for word in words {
            *map.entry(word.to_lowercase()).or_insert(0u32) += 1;
        }
    }
    println!("{:?}", map.len());
}
