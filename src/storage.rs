use std::{fs::File, io::Write};

use anyhow::{Context, Result};

use crate::{format::Formatter, rank::RankedArticle};

// Utils to store ranked results on local device.
pub struct LocalSaver;

impl LocalSaver {
    pub fn save_ranked_as_readme(fname: &str, data: &[RankedArticle]) -> Result<()> {
        let mut file =
            File::create(fname).with_context(|| format!("failed to create {}", fname))?;
        data.iter().try_for_each(|result| -> Result<()> {
            file.write_all(Formatter::to_readme(result).as_bytes())?;
            Ok(())
        })?;
        file.flush()?;
        Ok(())
    }

    pub fn save_ranked_as_jsonl(fname: &str, data: &[RankedArticle]) -> Result<()> {
        let mut file =
            File::create(fname).with_context(|| format!("failed to create {}", fname))?;
        data.iter().try_for_each(|result| -> Result<()> {
            file.write_all(Formatter::to_jsonl(result)?.as_bytes())?;
            Ok(())
        })?;
        file.flush()?;
        Ok(())
    }
}
