use ventokv_common::CommandError;

use crate::tokenize;

/// Cursor sobre os tokens de um comando para extrair argumentos sequencialmente.
pub struct Parse {
    parts: Vec<String>,
    pos: usize,
}

impl Parse {
    /// Cria um Parse a partir de tokens já separados.
    pub fn new(parts: Vec<String>) -> Result<Parse, CommandError> {
        if parts.is_empty() {
            return Err(CommandError::Empty);
        }
        Ok(Parse { parts, pos: 0 })
    }

    /// Tokeniza uma linha de comando e cria o cursor.
    pub fn from_line(line: &str) -> Result<Parse, CommandError> {
        Parse::new(tokenize(line)?)
    }

    /// Retorna o próximo token.
    pub fn next_string(&mut self) -> Result<String, CommandError> {
        if self.pos >= self.parts.len() {
            return Err(CommandError::InvalidArgument(
                "argumentos insuficientes".into(),
            ));
        }
        let s = std::mem::take(&mut self.parts[self.pos]);
        self.pos += 1;
        Ok(s)
    }

    /// Retorna o próximo token como i64.
    pub fn next_int(&mut self) -> Result<i64, CommandError> {
        let s = self.next_string()?;
        s.parse::<i64>()
            .map_err(|_| CommandError::InvalidArgument(format!("'{s}' não é um inteiro")))
    }

    /// Consome todos os tokens restantes.
    pub fn rest(&mut self) -> Vec<String> {
        let rest = self.parts.split_off(self.pos);
        self.pos = self.parts.len();
        rest
    }

    /// Verifica se todos os argumentos foram consumidos.
    pub fn finish(&self) -> Result<(), CommandError> {
        if self.pos < self.parts.len() {
            Err(CommandError::InvalidArgument(
                "argumentos extras não esperados".into(),
            ))
        } else {
            Ok(())
        }
    }

    /// Verifica se ainda há argumentos restantes.
    pub fn has_remaining(&self) -> bool {
        self.pos < self.parts.len()
    }

    /// Retorna o número de argumentos restantes.
    pub fn remaining(&self) -> usize {
        self.parts.len() - self.pos
    }
}
