use std::collections::HashSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::source::{open_file, Lines};
use super::{Diagnostic, EnforcePolicy, LoadError, Location, Reader};
use crate::dict::{Dict, Kind, Value};
use crate::parse::{classify, convert, Directive, Scanner};

pub(crate) const STREAM_ORIGIN: &str = "<stream>";

enum Flow {
    Continue,
    Stop,
}

/// State of one top-level load, shared by every nested include.
pub(crate) struct Pass<'a> {
    reader: &'a Reader,
    dict: &'a Dict,
    /// Identities of the files currently being read, outermost first.
    active: Vec<PathBuf>,
    enforced: HashSet<String>,
}

impl<'a> Pass<'a> {
    pub fn new(reader: &'a Reader, dict: &'a Dict) -> Self {
        Self {
            reader,
            dict,
            active: Vec::new(),
            enforced: HashSet::new(),
        }
    }

    pub fn read_file(&mut self, path: &Path) -> Result<(), LoadError> {
        let input = open_file(path)?;
        self.read_opened(path, input)
    }

    fn read_opened<R: BufRead>(&mut self, path: &Path, input: R) -> Result<(), LoadError> {
        self.active.push(identity(path));
        let result = self.read_lines(input, &path.display().to_string());
        self.active.pop();
        result
    }

    pub fn read_lines<R: BufRead>(&mut self, input: R, origin: &str) -> Result<(), LoadError> {
        let reader = self.reader;
        let options = &reader.options;
        if options.debug {
            debug!(origin, "opened config source");
        }

        let mut lines = Lines::new(input, options.max_line_len);
        loop {
            let line = lines.next_line().map_err(|e| LoadError::Io {
                origin: origin.to_string(),
                source: e,
            })?;
            let Some(line) = line else { break };

            let location = Location {
                origin: origin.to_string(),
                line: line.number,
            };
            if line.truncated {
                self.report(Diagnostic::LineTruncated {
                    location: location.clone(),
                    limit: options.max_line_len,
                });
            }
            if options.debug {
                debug!(%location, text = %line.text, "read line");
            }

            if let Flow::Stop = self.process_line(&line.text, location)? {
                if options.debug {
                    debug!(origin, line = line.number, "stopped at BREAK");
                }
                break;
            }
        }
        Ok(())
    }

    fn process_line(&mut self, text: &str, location: Location) -> Result<Flow, LoadError> {
        let mut scanner = Scanner::new(text);
        if !scanner.skip_blank() {
            return Ok(Flow::Continue);
        }

        let name = scanner.next_token();
        let directive = Directive::from_key(name);
        if directive == Some(Directive::Break) {
            return Ok(Flow::Stop);
        }

        if !scanner.skip_blank() {
            return Err(LoadError::MalformedLine {
                location,
                name: name.to_string(),
            });
        }
        let rest = scanner.remainder();
        let value = scanner.next_token();

        match directive {
            Some(Directive::Include) => self.include(value, location)?,
            Some(Directive::Warning) => self.report(Diagnostic::Warning {
                location,
                message: rest.to_string(),
            }),
            Some(Directive::Enforce) => {
                if !scanner.skip_blank() {
                    return Err(LoadError::MalformedLine {
                        location,
                        name: value.to_string(),
                    });
                }
                let enforced = scanner.next_token();
                self.enforce(value, enforced, location)?;
            }
            _ => self.store(name, value, location)?,
        }
        Ok(Flow::Continue)
    }

    fn include(&mut self, target: &str, location: Location) -> Result<(), LoadError> {
        let path = Path::new(target);
        let id = identity(path);

        if self.active.last() == Some(&id) {
            self.report(Diagnostic::SelfInclude {
                location,
                path: path.to_path_buf(),
            });
            return Ok(());
        }
        if self.active.contains(&id) {
            self.report(Diagnostic::IncludeCycle {
                location,
                path: path.to_path_buf(),
            });
            return Ok(());
        }

        match open_file(path) {
            Ok(input) => self.read_opened(path, input),
            Err(LoadError::SourceNotFound { source, .. }) if !self.reader.options.strict_includes => {
                self.report(Diagnostic::MissingInclude {
                    location,
                    path: path.to_path_buf(),
                    reason: source.to_string(),
                });
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Asserts `key` equals `value` in the string namespace, or sets it.
    fn enforce(&mut self, key: &str, value: &str, location: Location) -> Result<(), LoadError> {
        let outcome = self.dict.batch(|ns| match ns.get(key, Kind::Str) {
            Ok(Value::Str(existing)) if existing != value => Err(existing),
            Ok(_) => Ok(false),
            Err(_) => Ok(ns.add(key, value)),
        });

        match outcome {
            Err(existing) => Err(LoadError::EnforcementMismatch {
                location,
                key: key.to_string(),
                enforced: existing,
                found: value.to_string(),
            }),
            Ok(added) => {
                if self.reader.options.debug {
                    debug!(%location, key, value, added, "enforced value");
                }
                self.enforced.insert(key.to_string());
                Ok(())
            }
        }
    }

    fn store(&mut self, key: &str, token: &str, location: Location) -> Result<(), LoadError> {
        let Some(kind) = classify(token) else {
            if self.reader.options.debug {
                debug!(%location, key, "no storable value");
            }
            return Ok(());
        };

        if self.reader.options.enforce_policy == EnforcePolicy::Sticky
            && self.enforced.contains(key)
        {
            if let Ok(existing) = self.dict.get_string(key) {
                if existing != token {
                    return Err(LoadError::EnforcementMismatch {
                        location,
                        key: key.to_string(),
                        enforced: existing,
                        found: token.to_string(),
                    });
                }
            }
        }

        let value = convert(token, kind).map_err(|reason| LoadError::NumericConversion {
            location: location.clone(),
            token: token.to_string(),
            kind,
            reason,
        })?;
        if self.reader.options.debug {
            debug!(%location, key, %kind, %value, "stored value");
        }
        self.dict.add(key, value);
        Ok(())
    }

    fn report(&self, diagnostic: Diagnostic) {
        diagnostic.emit();
        if let Some(sink) = &self.reader.sink {
            sink(&diagnostic);
        }
    }
}

/// Identity used to detect re-entry into a file: canonical path when resolvable.
fn identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
