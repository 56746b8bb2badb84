/// Erros do store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("argumento inválido: {0}")]
    InvalidArgument(String),
    /// Condição NX não atendida.
    #[error("chave já existe")]
    AlreadyExists,
    /// Condição XX não atendida.
    #[error("chave não existe")]
    DoesNotExist,
    #[error("chave não encontrada ou expirada")]
    NotFound,
    #[error("operação contra chave com tipo errado")]
    WrongType,
    #[error("falha ao codificar fila: {0}")]
    Encoding(String),
}

impl StorageError {
    /// `true` quando a escrita condicional foi recusada (NX/XX).
    pub fn is_condition_failed(&self) -> bool {
        matches!(self, StorageError::AlreadyExists | StorageError::DoesNotExist)
    }

    /// `true` para falhas de codificação/decodificação do valor armazenado.
    pub fn is_encoding(&self) -> bool {
        matches!(self, StorageError::WrongType | StorageError::Encoding(_))
    }
}

/// Erros de parsing/validação de comandos.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("comando vazio")]
    Empty,
    #[error("comando desconhecido: {0}")]
    Unknown(String),
    #[error("número errado de argumentos para '{0}'")]
    WrongArity(String),
    #[error("opção inválida para SET: {0}")]
    InvalidSetOption(String),
    #[error("argumento inválido: {0}")]
    InvalidArgument(String),
    #[error("aspas não fechadas")]
    UnterminatedQuote,
}

/// Erros do servidor HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("endereço inválido: {0}")]
    InvalidAddress(String),
}

/// Erro top-level do VentoKV.
#[derive(Debug, thiserror::Error)]
pub enum VentoError {
    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Result type alias.
pub type VentoResult<T> = Result<T, VentoError>;

// Conversão implícita de io::Error → VentoError (via ServerError)
impl From<std::io::Error> for VentoError {
    fn from(e: std::io::Error) -> Self {
        VentoError::Server(ServerError::Io(e))
    }
}
