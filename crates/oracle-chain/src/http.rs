//! `reqwest`-backed [`ChainGateway`](crate::gateway::ChainGateway), talking
//! to a toncenter-style HTTP indexer (trace list/get, account info, get
//! method execution, NFT item metadata).

use async_trait::async_trait;
use oracle_types::Address;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::{
    error::ChainError,
    gateway::ChainGateway,
    model::{AccountInfo, AccountStatus, InMessage, NftItemData, Stack, StackItem, Trace, Transaction},
    retry::retry_on_rate_limit
};

pub struct HttpChainGateway {
    client:   reqwest::Client,
    base_url: url::Url,
    api_key:  Option<String>,
    cancel:   CancellationToken
}

impl HttpChainGateway {
    pub fn new(base_url: url::Url, api_key: Option<String>, cancel: CancellationToken) -> Self {
        Self { client: reqwest::Client::new(), base_url, api_key, cancel }
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let url = self.base_url.join(path).expect("path is a valid url segment");
        let mut req = self.client.get(url);
        if let Some(key) = &self.api_key {
            req = req.header("X-API-Key", key);
        }
        req
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ChainError> {
        retry_on_rate_limit(&self.cancel, || async {
            let response = self.request(path).query(query).send().await?;
            match response.status().as_u16() {
                429 => Err(ChainError::RateLimited),
                200..=299 => response
                    .json::<T>()
                    .await
                    .map_err(|err| ChainError::UnexpectedShape(err.to_string())),
                other => Err(ChainError::Http(other))
            }
        })
        .await
    }
}

#[async_trait]
impl ChainGateway for HttpChainGateway {
    async fn list_traces(
        &self,
        account: &Address,
        before_lt: i64,
        limit: u32
    ) -> Result<Vec<Trace>, ChainError> {
        let response: TraceListDto = self
            .get_json(
                "traces",
                &[
                    ("account", account.to_raw()),
                    ("before_lt", before_lt.to_string()),
                    ("limit", limit.to_string()),
                    ("sort", "desc".to_owned()),
                ]
            )
            .await?;
        response.traces.into_iter().map(TryInto::try_into).collect()
    }

    async fn get_trace(&self, root_tx_hash: &[u8; 32]) -> Result<Option<Trace>, ChainError> {
        let response: TraceGetDto = self
            .get_json("trace", &[("tx_hash", hex::encode(root_tx_hash))])
            .await?;
        response.trace.map(TryInto::try_into).transpose()
    }

    async fn get_account(&self, account: &Address) -> Result<AccountInfo, ChainError> {
        let dto: AccountDto = self.get_json("account", &[("address", account.to_raw())]).await?;
        dto.try_into()
    }

    async fn exec_getter(&self, account: &Address, method: &str, args: &[StackItem]) -> Result<Stack, ChainError> {
        let args_json = serde_json::to_string(&args.iter().map(stack_item_to_dto).collect::<Vec<_>>())
            .map_err(|err| ChainError::UnexpectedShape(err.to_string()))?;
        let dto: GetterDto = self
            .get_json(
                "runGetMethod",
                &[("address", account.to_raw()), ("method", method.to_owned()), ("args", args_json)]
            )
            .await?;
        if dto.exit_code != 0 {
            return Err(ChainError::UnexpectedShape(format!("getter {method} exited with code {}", dto.exit_code)));
        }
        dto.stack.into_iter().map(TryInto::try_into).collect::<Result<Vec<_>, _>>().map(Stack)
    }

    async fn get_nft_item(&self, account: &Address) -> Result<NftItemData, ChainError> {
        let dto: NftItemDto = self.get_json("nft/item", &[("address", account.to_raw())]).await?;
        dto.try_into()
    }
}

fn stack_item_to_dto(item: &StackItem) -> StackItemDto {
    match item {
        StackItem::Int(v) => StackItemDto { kind: "num".into(), value: v.to_string() },
        StackItem::Address(a) => StackItemDto { kind: "slice".into(), value: a.to_raw() },
        StackItem::Cell(bytes) => StackItemDto { kind: "cell".into(), value: base64_encode(bytes) },
        StackItem::Slice(bytes) => StackItemDto { kind: "slice".into(), value: base64_encode(bytes) },
        StackItem::Null => StackItemDto { kind: "null".into(), value: String::new() }
    }
}

fn base64_encode(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

fn base64_decode(s: &str) -> Result<Vec<u8>, ChainError> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(s)
        .map_err(|err| ChainError::UnexpectedShape(err.to_string()))
}

fn parse_address(raw: &str) -> Result<Address, ChainError> {
    Address::from_raw(raw).map_err(|err| ChainError::UnexpectedShape(err.to_string()))
}

fn parse_status(s: &str) -> AccountStatus {
    match s {
        "active" => AccountStatus::Active,
        "frozen" => AccountStatus::Frozen,
        "uninit" => AccountStatus::Uninitialized,
        _ => AccountStatus::NonExistent
    }
}

fn parse_op_code(s: &Option<String>) -> Option<u32> {
    let s = s.as_ref()?;
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    u32::from_str_radix(trimmed, 16).ok()
}

#[derive(Debug, Deserialize)]
struct TraceListDto {
    traces: Vec<TraceDto>
}

#[derive(Debug, Deserialize)]
struct TraceGetDto {
    trace: Option<TraceDto>
}

#[derive(Debug, Deserialize)]
struct TraceDto {
    transaction: TransactionDto,
    #[serde(default)]
    children:    Vec<TraceDto>
}

#[derive(Debug, Deserialize)]
struct TransactionDto {
    lt:          String,
    hash:        String,
    account:     String,
    now:         i64,
    orig_status: String,
    end_status:  String,
    success:     bool,
    in_msg:      Option<InMsgDto>
}

#[derive(Debug, Deserialize)]
struct InMsgDto {
    source:      Option<String>,
    destination: String,
    op_code:     Option<String>,
    body:        Option<String>
}

impl TryFrom<TraceDto> for Trace {
    type Error = ChainError;

    fn try_from(dto: TraceDto) -> Result<Self, Self::Error> {
        Ok(Trace {
            transaction: dto.transaction.try_into()?,
            children:    dto.children.into_iter().map(TryInto::try_into).collect::<Result<_, _>>()?
        })
    }
}

impl TryFrom<TransactionDto> for Transaction {
    type Error = ChainError;

    fn try_from(dto: TransactionDto) -> Result<Self, Self::Error> {
        let lt = dto
            .lt
            .parse()
            .map_err(|_| ChainError::UnexpectedShape(format!("non-numeric lt {:?}", dto.lt)))?;
        let hash_bytes = hex::decode(&dto.hash).map_err(|err| ChainError::UnexpectedShape(err.to_string()))?;
        let hash: [u8; 32] = hash_bytes
            .try_into()
            .map_err(|_| ChainError::UnexpectedShape("transaction hash is not 32 bytes".into()))?;
        let in_msg = dto
            .in_msg
            .map(|msg| -> Result<InMessage, ChainError> {
                Ok(InMessage {
                    source:      msg.source.as_deref().map(parse_address).transpose()?,
                    destination: parse_address(&msg.destination)?,
                    op_code:     parse_op_code(&msg.op_code),
                    body:        msg.body.as_deref().map(base64_decode).transpose()?.unwrap_or_default()
                })
            })
            .transpose()?;
        Ok(Transaction {
            lt,
            hash,
            account: parse_address(&dto.account)?,
            unix_time: dto.now,
            orig_status: parse_status(&dto.orig_status),
            end_status: parse_status(&dto.end_status),
            success: dto.success,
            in_msg
        })
    }
}

#[derive(Debug, Deserialize)]
struct AccountDto {
    address:     String,
    status:      String,
    balance:     String,
    last_lt:     String,
    #[serde(default)]
    get_methods: Vec<String>
}

impl TryFrom<AccountDto> for AccountInfo {
    type Error = ChainError;

    fn try_from(dto: AccountDto) -> Result<Self, Self::Error> {
        Ok(AccountInfo {
            address:      parse_address(&dto.address)?,
            status:       parse_status(&dto.status),
            balance_nano: dto.balance.parse().unwrap_or(0),
            last_lt:      dto.last_lt.parse().unwrap_or(0),
            get_methods:  dto.get_methods
        })
    }
}

#[derive(Debug, Deserialize)]
struct GetterDto {
    exit_code: i32,
    stack:     Vec<StackItemDto>
}

#[derive(Debug, Deserialize)]
struct StackItemDto {
    #[serde(rename = "type")]
    kind:  String,
    value: String
}

impl TryFrom<StackItemDto> for StackItem {
    type Error = ChainError;

    fn try_from(dto: StackItemDto) -> Result<Self, Self::Error> {
        match dto.kind.as_str() {
            "num" | "int" => dto
                .value
                .parse()
                .map(StackItem::Int)
                .map_err(|_| ChainError::UnexpectedShape(format!("non-numeric stack int {:?}", dto.value))),
            "cell" => Ok(StackItem::Cell(base64_decode(&dto.value)?)),
            "slice" => {
                if let Ok(address) = parse_address(&dto.value) {
                    Ok(StackItem::Address(address))
                } else {
                    Ok(StackItem::Slice(base64_decode(&dto.value)?))
                }
            }
            "null" => Ok(StackItem::Null),
            other => Err(ChainError::UnexpectedShape(format!("unknown stack item type {other}")))
        }
    }
}

#[derive(Debug, Deserialize)]
struct NftItemDto {
    address:    String,
    collection: Option<String>,
    owner:      Option<String>,
    index:      u64
}

impl TryFrom<NftItemDto> for NftItemData {
    type Error = ChainError;

    fn try_from(dto: NftItemDto) -> Result<Self, Self::Error> {
        Ok(NftItemData {
            address:    parse_address(&dto.address)?,
            collection: dto.collection.as_deref().map(parse_address).transpose()?,
            owner:      dto.owner.as_deref().map(parse_address).transpose()?,
            index:      dto.index
        })
    }
}
