use crate::domain::model::Coordinate;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 將自由文字地址轉為座標的外部協作者
///
/// 找不到時回傳 `Ok(None)`；`Err` 只代表解析服務本身失敗。
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<Option<Coordinate>>;

    fn name(&self) -> &'static str;
}
