use crate::error::{AppError, AppResult};
use reqwest::{Client, Response, StatusCode};

/// HTTP 客户端包装器
///
/// 不设置请求超时：下载耗时取决于网络和 JDK 大小，需要限时的调用方
/// 应在外层自行包装 `tokio::time::timeout`。
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// 创建新的 HTTP 客户端
    pub fn new(user_agent: &str) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::network(format!("创建 HTTP 客户端失败: {e}")))?;

        Ok(Self { client })
    }

    /// 发送 GET 请求，不检查状态码
    pub async fn send(&self, url: &str) -> AppResult<Response> {
        self.client.get(url).send().await.map_err(|e| {
            let error_msg = e.to_string();
            if e.is_connect() {
                AppError::network(format!("无法连接服务器: {error_msg} (URL: {url})"))
            } else {
                AppError::network(format!("网络请求失败: {error_msg} (URL: {url})"))
            }
        })
    }

    /// GET 请求，非 2xx 状态码视为错误
    pub async fn get(&self, url: &str) -> AppResult<Response> {
        let response = self.send(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::from_status(status, url));
        }
        Ok(response)
    }

    /// 读取响应体并解析为 JSON
    pub async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> AppResult<T> {
        let body = response
            .text()
            .await
            .map_err(|e| AppError::network(format!("读取响应失败: {e}")))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// 从 HTTP 状态码创建错误
    pub fn from_status(status: StatusCode, url: &str) -> AppError {
        AppError::network(format!("服务器返回状态码: {} (URL: {})", status, url))
    }
}
