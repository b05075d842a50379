//! In-memory ledger that emulates the tagged-summaries program closely enough
//! to drive the client end to end.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::system_program;
use solana_sdk::transaction::Transaction;
use tagsum_core::model::AiProcessingResult;
use tagsum_solana_client::connection::LedgerConnection;
use tagsum_solana_client::instructions::SummaryInstruction;
use tagsum_solana_client::{
    pda, ConnectionError, ProviderBundle, SummaryChainClient, SummaryStore, TaggedSummary,
    DEFAULT_PROGRAM_ID,
};

#[derive(Default)]
struct State {
    accounts: BTreeMap<Pubkey, Account>,
    clock: i64,
}

pub struct InMemoryLedger {
    program_id: Pubkey,
    state: Mutex<State>,
    calls: AtomicUsize,
    hide_store_once: AtomicBool,
    lose_confirmation_once: AtomicBool,
}

impl InMemoryLedger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            state: Mutex::new(State {
                accounts: BTreeMap::new(),
                clock: 1_700_000_000,
            }),
            calls: AtomicUsize::new(0),
            hide_store_once: AtomicBool::new(false),
            lose_confirmation_once: AtomicBool::new(false),
        }
    }

    /// Number of connection calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Report the store as missing on the next read, as if another caller
    /// initialized it between our read and our write.
    pub fn hide_store_once(&self) {
        self.hide_store_once.store(true, Ordering::SeqCst);
    }

    /// Send lamports to `address` without allocating it, as any third party
    /// can.
    pub fn fund(&self, address: Pubkey, lamports: u64) {
        let account = Account {
            lamports,
            data: Vec::new(),
            owner: system_program::id(),
            executable: false,
            rent_epoch: 0,
        };
        self.state.lock().unwrap().accounts.insert(address, account);
    }

    /// Give `address` to another program, with data.
    pub fn put_foreign(&self, address: Pubkey, owner: Pubkey, data: Vec<u8>) {
        let account = Account {
            lamports: 1_000_000,
            data,
            owner,
            executable: false,
            rent_epoch: 0,
        };
        self.state.lock().unwrap().accounts.insert(address, account);
    }

    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.state
            .lock()
            .unwrap()
            .accounts
            .get(address)
            .map_or(0, |a| a.lamports)
    }

    /// Apply the next transaction but report that confirmation timed out.
    pub fn lose_confirmation_once(&self) {
        self.lose_confirmation_once.store(true, Ordering::SeqCst);
    }

    pub fn put_raw(&self, address: Pubkey, data: Vec<u8>) {
        let account = self.owned(data);
        self.state.lock().unwrap().accounts.insert(address, account);
    }

    pub fn store(&self) -> Option<SummaryStore> {
        let (addr, _) = pda::derive_store_address(&self.program_id);
        let state = self.state.lock().unwrap();
        state
            .accounts
            .get(&addr)
            .map(|a| SummaryStore::try_from_account_data(&a.data).unwrap())
    }

    fn owned(&self, data: Vec<u8>) -> Account {
        Account {
            lamports: 1_000_000,
            data,
            owner: self.program_id,
            executable: false,
            rent_epoch: 0,
        }
    }

    /// Anchor `init` tops up a pre-funded address rather than failing.
    fn init_account(&self, state: &State, address: &Pubkey, data: Vec<u8>) -> Account {
        let mut account = self.owned(data);
        if let Some(existing) = state.accounts.get(address) {
            account.lamports += existing.lamports;
        }
        account
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn execute(&self, state: &mut State, keys: &[Pubkey], ix: SummaryInstruction) -> Result<(), ConnectionError> {
        let (store_addr, _) = pda::derive_store_address(&self.program_id);
        match ix {
            SummaryInstruction::Initialize => {
                if keys[0] != store_addr {
                    return Err(anchor_error("ConstraintSeeds", 2006, "A seeds constraint was violated"));
                }
                if allocated(state, &store_addr) {
                    return Err(already_in_use(&store_addr));
                }
                let data = SummaryStore {
                    authority: keys[1],
                    total_summaries: 0,
                }
                .to_account_data()
                .unwrap();
                let account = self.init_account(state, &store_addr, data);
                state.accounts.insert(store_addr, account);
                Ok(())
            }
            SummaryInstruction::StoreTaggedSummary(args) => {
                let (record, store, student) = (keys[0], keys[1], keys[2]);
                if store != store_addr {
                    return Err(anchor_error("ConstraintSeeds", 2006, "A seeds constraint was violated"));
                }
                let Some(store_acc) = state.accounts.get(&store_addr) else {
                    return Err(anchor_error(
                        "AccountNotInitialized",
                        3012,
                        "The program expected this account to be already initialized",
                    ));
                };
                let mut store_state = SummaryStore::try_from_account_data(&store_acc.data).unwrap();

                if args.tags.len() > 15 {
                    return Err(anchor_error("TooManyTags", 6000, "Too many tags (maximum 15 allowed)"));
                }
                if args.summary.len() > 800 {
                    return Err(anchor_error("SummaryTooLong", 6001, "Summary too long (maximum 800 characters)"));
                }
                if args.confidence_score > 100 {
                    return Err(anchor_error("InvalidConfidence", 6002, "Invalid confidence score (0-100 only)"));
                }
                if args.transaction_hash.len() != 64 {
                    return Err(anchor_error("InvalidHash", 6003, "Transaction hash must be 64 characters"));
                }
                let (expected, _) =
                    pda::derive_summary_address(&self.program_id, &args.transaction_hash, &student);
                if record != expected {
                    return Err(anchor_error("ConstraintSeeds", 2006, "A seeds constraint was violated"));
                }
                if allocated(state, &record) {
                    return Err(already_in_use(&record));
                }

                let rec = TaggedSummary {
                    id: store_state.total_summaries,
                    transaction_hash: args.transaction_hash,
                    summary: args.summary,
                    tags: args.tags,
                    category: args.category,
                    confidence_score: args.confidence_score,
                    timestamp: state.clock,
                    student_wallet: student,
                };
                state.clock += 1;
                store_state.total_summaries += 1;

                let account = self.init_account(state, &record, rec.to_account_data().unwrap());
                state.accounts.insert(record, account);
                state
                    .accounts
                    .insert(store_addr, self.owned(store_state.to_account_data().unwrap()));
                Ok(())
            }
        }
    }
}

/// Taken for `init` purposes: anything but a bare system-owned balance.
fn allocated(state: &State, address: &Pubkey) -> bool {
    state
        .accounts
        .get(address)
        .is_some_and(|a| a.owner != system_program::id() || !a.data.is_empty())
}

fn anchor_error(name: &str, number: u32, message: &str) -> ConnectionError {
    ConnectionError::rejected(
        format!(
            "RPC response error -32002: Transaction simulation failed: Error processing Instruction 0: custom program error: {number:#x}"
        ),
        vec![
            "Program F8qn46JxkYB3koH2tZc38qceCK3PHQ5PafaJR6u5AyD7 invoke [1]".into(),
            format!(
                "Program log: AnchorError occurred. Error Code: {name}. Error Number: {number}. Error Message: {message}."
            ),
        ],
    )
}

fn already_in_use(address: &Pubkey) -> ConnectionError {
    ConnectionError::rejected(
        "RPC response error -32002: Transaction simulation failed: Error processing Instruction 0: custom program error: 0x0",
        vec![format!(
            "Allocate: account Address {{ address: {address}, base: None }} already in use"
        )],
    )
}

#[async_trait]
impl LedgerConnection for InMemoryLedger {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, ConnectionError> {
        self.tick();
        let (store_addr, _) = pda::derive_store_address(&self.program_id);
        if *address == store_addr && self.hide_store_once.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.state.lock().unwrap().accounts.get(address).cloned())
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
    ) -> Result<Vec<(Pubkey, Account)>, ConnectionError> {
        self.tick();
        let state = self.state.lock().unwrap();
        Ok(state
            .accounts
            .iter()
            .filter(|(_, a)| a.owner == *program_id)
            .map(|(k, a)| (*k, a.clone()))
            .collect())
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ConnectionError> {
        self.tick();
        Ok(Hash::new_unique())
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, ConnectionError> {
        self.tick();
        if tx.verify().is_err() {
            return Err(ConnectionError::rejected("Transaction signature verification failure", vec![]));
        }

        let message = &tx.message;
        let mut state = self.state.lock().unwrap();
        for compiled in &message.instructions {
            if *compiled.program_id(&message.account_keys) != self.program_id {
                return Err(ConnectionError::rejected("unknown program", vec![]));
            }
            let keys: Vec<Pubkey> = compiled
                .accounts
                .iter()
                .map(|i| message.account_keys[*i as usize])
                .collect();
            let ix = SummaryInstruction::unpack(&compiled.data)
                .map_err(|e| ConnectionError::rejected(e.to_string(), vec![]))?;
            let signer_index = match ix {
                SummaryInstruction::Initialize => compiled.accounts[1],
                SummaryInstruction::StoreTaggedSummary(_) => compiled.accounts[2],
            };
            if !message.is_signer(signer_index as usize) {
                return Err(ConnectionError::rejected("missing required signature", vec![]));
            }
            self.execute(&mut state, &keys, ix)?;
        }
        if self.lose_confirmation_once.swap(false, Ordering::SeqCst) {
            return Err(ConnectionError::Unconfirmed {
                signature: tx.signatures[0],
                after: Duration::from_secs(30),
            });
        }
        Ok(tx.signatures[0])
    }
}

pub struct Harness {
    pub ledger: Arc<InMemoryLedger>,
    pub wallet: Arc<Keypair>,
    pub client: SummaryChainClient,
}

impl Harness {
    pub fn new() -> Self {
        let ledger = Arc::new(InMemoryLedger::new(DEFAULT_PROGRAM_ID));
        Self::on(ledger)
    }

    /// A second wallet sharing the same ledger.
    pub fn on(ledger: Arc<InMemoryLedger>) -> Self {
        let wallet = Arc::new(Keypair::new());
        let bundle = ProviderBundle::new(ledger.clone(), DEFAULT_PROGRAM_ID).with_signer(wallet.clone());
        Self {
            ledger,
            wallet,
            client: SummaryChainClient::new(bundle),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.wallet.pubkey()
    }
}

pub fn result(summary: &str) -> AiProcessingResult {
    AiProcessingResult::new(summary, vec!["campus".into(), "food".into()], "dining", 85)
}

pub fn hash(n: u8) -> String {
    format!("{n:02x}").repeat(32)
}
