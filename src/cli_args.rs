use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct CommandLineArguments {
    input: PathBuf,
}

impl CommandLineArguments {
    // エラーは理由だけを返し、usage 行は呼び出し側で組み立てる
    pub fn parse<S: Into<OsString>>(args: Vec<S>) -> Result<Self, String> {
        let mut iter = args.into_iter();
        let input = match iter.next() {
            Some(arg) => PathBuf::from(arg.into()),
            None => return Err(String::from("missing input file")),
        };
        if iter.next().is_some() {
            return Err(String::from("unexpected extra argument"));
        }
        Ok(Self { input })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }
}
