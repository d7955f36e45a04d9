//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用される `SatelliteHost` のテストダブルを提供します。
#![cfg(test)]

use std::sync::Mutex;

use thiserror::Error;

use crate::host::SatelliteHost;

/// `RecordingHost` が記録する呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HostCall {
    /// `fetch_available_cultures`
    Fetch,
    /// `load_satellite_assemblies` とその引数
    Load(Vec<String>),
}

/// テストダブルが返すエラー
#[derive(Error, Debug)]
#[error("{0}")]
pub(crate) struct TestHostError(String);

/// 呼び出しを記録し、固定の利用可能カルチャを返すホスト
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    /// `fetch_available_cultures` の戻り値
    available: Option<Vec<String>>,
    /// 記録された呼び出し
    calls: Mutex<Vec<HostCall>>,
    /// fetch を失敗させる
    fail_fetch: bool,
    /// load を失敗させる
    fail_load: bool,
}

impl RecordingHost {
    /// 利用可能カルチャを返すホストを作成する
    pub(crate) fn with_cultures(available: &[&str]) -> Self {
        Self {
            available: Some(available.iter().map(|name| (*name).to_string()).collect()),
            ..Self::default()
        }
    }

    /// ローカライズ未設定（`None`）を返すホストを作成する
    pub(crate) fn without_cultures() -> Self {
        Self::default()
    }

    pub(crate) fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub(crate) fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    /// 記録された呼び出しを取得する
    #[allow(clippy::unwrap_used)]
    pub(crate) fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    /// 記録をクリアする
    #[allow(clippy::unwrap_used)]
    pub(crate) fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// 呼び出しを記録する
    #[allow(clippy::unwrap_used)]
    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl SatelliteHost for RecordingHost {
    type Error = TestHostError;

    fn fetch_available_cultures(&self) -> Result<Option<Vec<String>>, Self::Error> {
        self.record(HostCall::Fetch);
        if self.fail_fetch {
            return Err(TestHostError("fetch failed".to_string()));
        }
        Ok(self.available.clone())
    }

    async fn load_satellite_assemblies(&self, cultures: &[String]) -> Result<(), Self::Error> {
        self.record(HostCall::Load(cultures.to_vec()));
        if self.fail_load {
            return Err(TestHostError("load failed".to_string()));
        }
        tokio::task::yield_now().await;
        Ok(())
    }
}
