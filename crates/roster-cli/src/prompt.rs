//! Interactive account-access confirmation.
//!
//! Wraps a wallet so that exposing its account needs an explicit "yes" on the
//! terminal, the way a browser wallet asks before connecting a site.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use roster_core::model::Identity;
use roster_core::wallet::WalletProvider;
use roster_core::{WalletError, WalletResult};

pub struct PromptingWallet<W> {
    inner: W,
    assume_yes: bool,
}

impl<W> PromptingWallet<W> {
    pub fn new(inner: W, assume_yes: bool) -> Self {
        Self { inner, assume_yes }
    }
}

#[async_trait]
impl<W: WalletProvider> WalletProvider for PromptingWallet<W> {
    type Signer = W::Signer;

    async fn request_accounts(&self) -> WalletResult<Vec<Identity>> {
        let accounts = self.inner.request_accounts().await?;
        let Some(first) = accounts.first() else {
            return Err(WalletError::NoAccounts);
        };
        if self.assume_yes {
            return Ok(accounts);
        }

        let question = format!("Allow roster to use account {}? [y/N] ", first.short());
        let answer = ask(&question).await.map_err(|e| WalletError::Unavailable(format!("prompt failed: {e}")))?;
        if is_yes(&answer) {
            Ok(accounts)
        } else {
            Err(WalletError::Rejected)
        }
    }

    fn signer(&self, identity: &Identity) -> WalletResult<Self::Signer> {
        self.inner.signer(identity)
    }
}

async fn ask(question: &str) -> std::io::Result<String> {
    let mut err = tokio::io::stderr();
    err.write_all(question.as_bytes()).await?;
    err.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line)
}

/// EOF and anything but y/yes count as "no".
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
