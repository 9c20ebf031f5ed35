use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入相关错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 会话操作错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 输入错误
///
/// 无法解析的行不算错误，只会被跳过
#[derive(Debug, Error)]
pub enum InputError {
    /// 没有提供待分配订单
    #[error("没有待分配的订单，请先粘贴订单文本")]
    EmptyOrders,
    /// 订单文本中没有任何可识别的订单
    #[error("订单文本中没有可识别的订单 (共 {lines} 行)")]
    NoRecognizableOrders { lines: usize },
}

/// 会话操作错误
#[derive(Debug, Error)]
pub enum SessionError {
    /// 尚未计算分配
    #[error("尚未计算分配")]
    NotCalculated,
    /// 当前队列中找不到该订单
    #[error("订单 {order_id} 不在当前队列中")]
    UnknownOrder { order_id: String },
    /// 订单未被分配（候选为空或超出显示上限）
    #[error("订单 {order_id} 没有分配结果")]
    OrderNotAssigned { order_id: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 名单为空
    #[error("人员名单不能为空")]
    EmptyRoster,
    /// 订单号前缀必须是数字
    #[error("订单号前缀 '{prefix}' 无效，必须是 1-5 位数字")]
    InvalidOrderPrefix { prefix: String },
    /// 正则表达式构建失败
    #[error("解析模式构建失败: {0}")]
    InvalidPattern(#[from] regex::Error),
    /// TOML 解析失败
    #[error("配置 TOML 解析失败: {0}")]
    TomlParseFailed(#[from] toml::de::Error),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
