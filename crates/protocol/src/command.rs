use ventokv_common::CommandError;

use crate::Parse;

/// Condição para SET (NX ou XX).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetCondition {
    /// Só seta se a chave não existir.
    Nx,
    /// Só seta se a chave já existir.
    Xx,
}

impl SetCondition {
    /// Interpreta a condição no formato do corpo JSON.
    /// Vazio significa sem condição.
    pub fn parse(s: &str) -> Result<Option<SetCondition>, CommandError> {
        match s.trim().to_uppercase().as_str() {
            "" => Ok(None),
            "NX" => Ok(Some(SetCondition::Nx)),
            "XX" => Ok(Some(SetCondition::Xx)),
            other => Err(CommandError::InvalidSetOption(other.to_string())),
        }
    }
}

/// Opções do comando SET.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// TTL em segundos. 0 = sem expiração; negativo é rejeitado pelo store.
    pub ttl_secs: i64,
    pub condition: Option<SetCondition>,
}

impl SetOptions {
    pub fn new(ttl_secs: i64, condition: Option<SetCondition>) -> Self {
        Self {
            ttl_secs,
            condition,
        }
    }
}

/// Enum com todos os comandos suportados.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Get(String),
    Set {
        key: String,
        value: String,
        options: SetOptions,
    },
    QPush {
        key: String,
        values: Vec<String>,
    },
}

impl Command {
    /// Faz o parse de uma linha como `SET key value EX 10 NX`.
    pub fn from_line(line: &str) -> Result<Command, CommandError> {
        let mut parse = Parse::from_line(line)?;
        let cmd_name = parse.next_string()?.to_uppercase();

        let cmd = match cmd_name.as_str() {
            "GET" => {
                if parse.remaining() != 1 {
                    return Err(CommandError::WrongArity("GET".into()));
                }
                let key = parse.next_string()?;
                parse.finish()?;
                Command::Get(key)
            }
            "SET" => parse_set(&mut parse)?,
            "QPUSH" => {
                if parse.remaining() < 2 {
                    return Err(CommandError::WrongArity("QPUSH".into()));
                }
                let key = parse.next_string()?;
                let values = parse.rest();
                Command::QPush { key, values }
            }
            _ => return Err(CommandError::Unknown(cmd_name)),
        };

        Ok(cmd)
    }

    /// Nome do comando, para logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Get(_) => "GET",
            Command::Set { .. } => "SET",
            Command::QPush { .. } => "QPUSH",
        }
    }
}

fn parse_set(parse: &mut Parse) -> Result<Command, CommandError> {
    if parse.remaining() < 2 {
        return Err(CommandError::WrongArity("SET".into()));
    }
    let key = parse.next_string()?;
    let value = parse.next_string()?;

    let mut options = SetOptions::default();
    let mut seen_ex = false;

    while parse.has_remaining() {
        let opt = parse.next_string()?.to_uppercase();
        match opt.as_str() {
            "EX" => {
                if seen_ex {
                    return Err(CommandError::InvalidSetOption("EX repetido".into()));
                }
                if !parse.has_remaining() {
                    return Err(CommandError::InvalidSetOption(
                        "EX exige um valor".into(),
                    ));
                }
                let secs = parse.next_int()?;
                if secs < 0 {
                    return Err(CommandError::InvalidSetOption(
                        "EX não pode ser negativo".into(),
                    ));
                }
                options.ttl_secs = secs;
                seen_ex = true;
            }
            "NX" | "XX" => {
                let cond = if opt == "NX" {
                    SetCondition::Nx
                } else {
                    SetCondition::Xx
                };
                match options.condition {
                    Some(prev) if prev != cond => {
                        return Err(CommandError::InvalidSetOption(
                            "NX e XX são mutuamente exclusivos".into(),
                        ));
                    }
                    _ => options.condition = Some(cond),
                }
            }
            other => {
                return Err(CommandError::InvalidSetOption(other.to_string()));
            }
        }
    }

    Ok(Command::Set {
        key,
        value,
        options,
    })
}
