//! Loads a mining database from disk: one input tree per non-blank line.

use std::fs;
use std::path::Path;

use crate::core::tree::{InputTree, TreeId};
use crate::error::Error;

/// The set of input trees a mining run searches over.
#[derive(Debug)]
pub struct Database {
    trees: Vec<InputTree>,
}

impl Database {
    /// Reads `path`, tokenizing each non-blank line into a tree. Blank
    /// lines are skipped and do not consume an id; ids are assigned
    /// sequentially starting at 1 over the remaining lines.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut trees = Vec::new();
        let mut next_id: TreeId = 1;
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let tokens = Self::tokenize(line, next_id)?;
            trees.push(InputTree::parse(next_id, &tokens)?);
            next_id += 1;
        }

        log::info!("loaded {} tree(s) from {}", trees.len(), path.display());
        Ok(Database { trees })
    }

    fn tokenize(line: &str, id: TreeId) -> Result<Vec<i64>, Error> {
        line.split_whitespace()
            .map(|tok| {
                tok.parse::<i64>().map_err(|_| Error::MalformedInput {
                    line: id as usize,
                    reason: format!("token {tok:?} is not an integer"),
                })
            })
            .collect()
    }

    pub fn trees(&self) -> &[InputTree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
