//! Implements the command line behavior.

use codespan_reporting::{
    diagnostic::{Diagnostic, Label, LabelStyle, Severity},
    files::SimpleFiles,
    term::{
        self,
        termcolor::{ColorChoice, StandardStream},
    },
};
use log::{debug, info};
use pascallite_analyzer::symbol_table::SymbolTable;
use pascallite_dsl::core::FileId;
use pascallite_parser::{options::ParseOptions, tokenize_program};
use std::{
    fs::{self, metadata, read_dir},
    ops::Range,
    path::{Path, PathBuf},
};

use crate::stages::{translate, Artifact, CompilerMode, CompilerOptions};

/// Checks the syntax and the declarations of the specified files.
///
/// Directories are expanded to the files they contain.
pub fn check(
    paths: Vec<PathBuf>,
    parse: &ParseOptions,
    suppress_output: bool,
) -> Result<(), String> {
    let mut files: Vec<PathBuf> = vec![];
    for path in paths {
        files.append(&mut enumerate_files(&path)?);
    }

    let options = CompilerOptions {
        mode: CompilerMode::Ast,
        resolve_symbols: true,
        parse: parse.clone(),
    };

    let mut errors = 0;
    for path in &files {
        let (source, file_id) = read_source(path)?;
        let diagnostics = match translate(&source, &file_id, &options) {
            Ok(translation) => translation.diagnostics,
            Err(diagnostics) => diagnostics,
        };
        errors += handle_diagnostics(&diagnostics, &file_id, &source, suppress_output);
    }

    if errors > 0 {
        return Err(format!("Number of errors: {}", errors));
    }

    if !suppress_output {
        println!("OK");
    }
    Ok(())
}

/// Prints the tokens of the file, one per line.
pub fn tokenize(path: &Path, parse: &ParseOptions, suppress_output: bool) -> Result<(), String> {
    let (source, file_id) = read_source(path)?;
    let (tokens, diagnostics) = tokenize_program(&source, &file_id, parse);
    debug!("Tokenized {} into {} tokens", file_id, tokens.len());

    if !suppress_output {
        for token in &tokens {
            println!("{}", token);
        }
    }

    let errors = handle_diagnostics(&diagnostics, &file_id, &source, suppress_output);
    if errors > 0 {
        return Err(format!("Number of errors: {}", errors));
    }
    Ok(())
}

/// Prints the syntax tree of the file as JSON.
///
/// When `resolve` is set the declarations and uses are checked as well.
pub fn ast(
    path: &Path,
    resolve: bool,
    parse: &ParseOptions,
    suppress_output: bool,
) -> Result<(), String> {
    let options = CompilerOptions {
        mode: CompilerMode::Ast,
        resolve_symbols: resolve,
        parse: parse.clone(),
    };
    let (source, file_id) = read_source(path)?;

    let translation = translate(&source, &file_id, &options).map_err(|diagnostics| {
        let errors = handle_diagnostics(&diagnostics, &file_id, &source, suppress_output);
        format!("Number of errors: {}", errors)
    })?;
    let errors = handle_diagnostics(&translation.diagnostics, &file_id, &source, suppress_output);

    if let Artifact::Ast { program, .. } = &translation.artifact {
        let json = serde_json::to_string_pretty(program)
            .map_err(|e| format!("Unable to write syntax tree. {}", e))?;
        if !suppress_output {
            println!("{}", json);
        }
    }

    if errors > 0 {
        return Err(format!("Number of errors: {}", errors));
    }
    Ok(())
}

/// Compiles the file into a MEPA listing.
///
/// The listing goes to `output` when set, otherwise to stdout. When
/// `symbols` is set the symbol table is printed after the listing.
pub fn compile(
    path: &Path,
    output: Option<PathBuf>,
    symbols: bool,
    parse: &ParseOptions,
    suppress_output: bool,
) -> Result<(), String> {
    let options = CompilerOptions {
        mode: CompilerMode::Codegen,
        resolve_symbols: true,
        parse: parse.clone(),
    };
    let (source, file_id) = read_source(path)?;

    let translation = translate(&source, &file_id, &options).map_err(|diagnostics| {
        let errors = handle_diagnostics(&diagnostics, &file_id, &source, suppress_output);
        format!("Number of errors: {}", errors)
    })?;
    let errors = handle_diagnostics(&translation.diagnostics, &file_id, &source, suppress_output);

    if let Artifact::Listing {
        listing,
        symbols: table,
    } = &translation.artifact
    {
        match &output {
            Some(out) => {
                fs::write(out, listing.to_string())
                    .map_err(|e| format!("Unable to write {}. {}", out.display(), e))?;
                info!("Wrote {} instructions to {}", listing.len(), out.display());
            }
            None => {
                if !suppress_output {
                    print!("{}", listing);
                }
            }
        }

        if symbols && !suppress_output {
            print!("{}", format_symbols(table));
        }
    }

    if errors > 0 {
        return Err(format!("Number of errors: {}", errors));
    }
    Ok(())
}

/// Formats the table as one `address name type` line per entry.
pub fn format_symbols(table: &SymbolTable) -> String {
    table
        .iter()
        .map(|entry| format!("{} {} {}\n", entry.address, entry.name, entry.type_name))
        .collect()
}

fn read_source(path: &Path) -> Result<(String, FileId), String> {
    let source = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file {}. {}", path.display(), e))?;
    Ok((source, FileId::from_path(path)))
}

fn enumerate_files(path: &PathBuf) -> Result<Vec<PathBuf>, String> {
    let metadata = metadata(path).map_err(|e| e.to_string())?;
    if metadata.is_dir() {
        let paths = read_dir(path).map_err(|e| e.to_string())?;
        let mut paths: Vec<PathBuf> = paths
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(_) => None,
            })
            .filter(|path| path.is_file())
            .collect();
        paths.sort();
        return Ok(paths);
    }
    if metadata.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    Ok(vec![])
}

/// Writes the diagnostics to stderr and returns the number that are
/// errors.
fn handle_diagnostics(
    diagnostics: &[pascallite_dsl::diagnostic::Diagnostic],
    file_id: &FileId,
    source: &str,
    suppress_output: bool,
) -> usize {
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    if suppress_output || diagnostics.is_empty() {
        return errors;
    }

    let writer = StandardStream::stderr(ColorChoice::Always);
    let config = codespan_reporting::term::Config::default();

    let mut files: SimpleFiles<String, &str> = SimpleFiles::new();
    let file = files.add(file_id.to_string(), source);

    for diagnostic in diagnostics {
        let diagnostic = map_diagnostic(diagnostic.clone(), file);
        let _ = term::emit(&mut writer.lock(), &config, &files, &diagnostic).map_err(|err| {
            eprintln!("Failed writing to terminal: {}", err);
        });
    }
    errors
}

fn map_label(
    label: pascallite_dsl::diagnostic::Label,
    style: LabelStyle,
    file: usize,
) -> Label<usize> {
    let range = match label.location {
        pascallite_dsl::diagnostic::Location::QualifiedPosition(pos) => Range {
            start: pos.offset,
            end: pos.offset,
        },
        pascallite_dsl::diagnostic::Location::OffsetRange(offset) => Range {
            start: offset.start,
            end: offset.end,
        },
    };
    Label::new(style, file, range).with_message(label.message)
}

fn map_severity(severity: pascallite_dsl::diagnostic::Severity) -> Severity {
    match severity {
        pascallite_dsl::diagnostic::Severity::Error => Severity::Error,
        pascallite_dsl::diagnostic::Severity::Warning => Severity::Warning,
    }
}

fn map_diagnostic(
    diagnostic: pascallite_dsl::diagnostic::Diagnostic,
    file: usize,
) -> Diagnostic<usize> {
    let description = diagnostic.description();
    let severity = map_severity(diagnostic.severity);

    // Set the primary labels
    let mut labels = vec![map_label(diagnostic.primary, LabelStyle::Primary, file)];

    // Add any secondary labels
    labels.extend(
        diagnostic
            .secondary
            .into_iter()
            .map(|lbl| map_label(lbl, LabelStyle::Secondary, file)),
    );

    Diagnostic::new(severity)
        .with_code(diagnostic.code)
        .with_message(description)
        .with_labels(labels)
}
