//! OpenAPI manifest describing the treat tools to the assistant runtime.

use serde_json::{json, Value};

pub const CREATE_CHANNEL_PATH: &str = "/tools/create-channel";
pub const MINT_TREAT_PATH: &str = "/tools/mint-treat";

const INSTRUCTIONS: &str = "\
You are a helpful assistant that manages ShardDog treats. \
You can help users create treat channels and mint treats to wallets.

Channel creation workflow:
1. Creating a channel returns a channelId and an apiKey.
2. The service stores the apiKey; you only need to keep the channelId.
3. The channelId is required for every mint.

When creating a channel, format the parameters as follows:
1. title: plain text, avoid special characters if possible.
2. description: plain text, avoid special characters if possible.
3. mediaUrl: a complete URL starting with http:// or https://.
4. reference: valid JSON, either a JSON object or a stringified object.
5. wallet (optional): NEAR account name; .near is added if missing.

When minting treats:
1. Use the channelId returned by channel creation.
2. Provide either receiverId or wallet; .near is added unless the account \
already ends in .near or .testnet.
3. The stored key for that channel is used automatically.

Example:
1. Create channel. Response: {\"channelId\": \"abc123\", \"apiKey\": \"xyz789\"}
2. Mint treat. Request: {\"channelId\": \"abc123\", \"receiverId\": \"user.near\"}

Endpoints:
- /tools/create-channel: create a new treat channel
- /tools/mint-treat: mint a treat to a wallet";

/// Build the plugin manifest.
///
/// `account_id` is omitted from `x-mb` when unknown.
pub fn plugin_manifest(public_url: &str, account_id: Option<&str>) -> Value {
    let mut x_mb = json!({
        "assistant": {
            "name": "ShardDog Assistant",
            "description": "An assistant that helps manage ShardDog treats, create channels, and mint treats to wallets",
            "instructions": INSTRUCTIONS,
            "tools": [{ "type": "generate-transaction" }],
            "version": "1.0.0",
        },
    });
    if let (Some(account), Some(x_mb)) = (account_id, x_mb.as_object_mut()) {
        x_mb.insert("account-id".to_string(), json!(account));
    }

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "ShardDog Treat Maker",
            "description": "API for managing ShardDog treats - create channels and mint treats",
            "version": "1.0.0",
        },
        "servers": [{ "url": public_url }],
        "x-mb": x_mb,
        "paths": {
            CREATE_CHANNEL_PATH: create_channel_path(),
            MINT_TREAT_PATH: mint_treat_path(),
        },
    })
}

fn create_channel_path() -> Value {
    json!({
        "post": {
            "summary": "Create a ShardDog treat channel",
            "description": "Creates a new ShardDog treat channel. Requires a title, a description, \
an http/https mediaUrl and a JSON reference. The wallet is optional and gets a .near suffix if missing.",
            "operationId": "createChannel",
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": {
                        "schema": {
                            "type": "object",
                            "required": ["title", "description", "mediaUrl", "reference"],
                            "properties": {
                                "title": {
                                    "type": "string",
                                    "description": "Name of your channel",
                                    "example": "My Test Channel",
                                },
                                "description": {
                                    "type": "string",
                                    "description": "Description of what your channel is about",
                                    "example": "A channel for testing ShardDog treats",
                                },
                                "mediaUrl": {
                                    "type": "string",
                                    "description": "Full URL to channel image (must start with http:// or https://)",
                                    "example": "https://example.com/image.png",
                                },
                                "reference": {
                                    "type": "string",
                                    "description": "Valid JSON, as an object or a stringified object",
                                    "example": "{\"type\": \"test\"}",
                                },
                                "wallet": {
                                    "type": "string",
                                    "description": "NEAR wallet address (optional). Will be suffixed with .near if needed",
                                    "example": "example.near",
                                },
                            },
                        },
                        "examples": {
                            "simple": {
                                "value": {
                                    "title": "Test Channel",
                                    "description": "A test channel for ShardDog",
                                    "mediaUrl": "https://example.com/image.png",
                                    "reference": "{\"type\": \"test\"}",
                                    "wallet": "test.near",
                                },
                            },
                        },
                    },
                },
            },
            "responses": {
                "200": {
                    "description": "Channel created successfully",
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "object",
                                "properties": {
                                    "channelId": { "type": "string" },
                                    "apiKey": { "type": "string" },
                                },
                            },
                        },
                    },
                },
                "400": {
                    "description": "Wallet input required",
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "object",
                                "properties": {
                                    "error": { "type": "string", "example": "Wallet address required" },
                                    "code": { "type": "string", "example": "WALLET_INPUT_REQUIRED" },
                                    "message": {
                                        "type": "string",
                                        "example": "Please provide your NEAR wallet address",
                                    },
                                },
                            },
                        },
                    },
                },
            },
        },
    })
}

fn mint_treat_path() -> Value {
    json!({
        "post": {
            "summary": "Mint a ShardDog treat",
            "description": "Mints a treat to the specified wallet",
            "operationId": "mintTreat",
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": {
                        "schema": {
                            "type": "object",
                            "required": ["channelId"],
                            "properties": {
                                "channelId": {
                                    "type": "string",
                                    "description": "Channel ID received from channel creation",
                                },
                                "receiverId": {
                                    "type": "string",
                                    "description": "Receiver's wallet address (will add .near if missing)",
                                },
                                "wallet": {
                                    "type": "string",
                                    "description": "Alternative to receiverId - wallet address to receive the treat",
                                },
                            },
                        },
                        "examples": {
                            "using-receiver-id": {
                                "value": { "channelId": "abc123", "receiverId": "user.near" },
                            },
                            "using-wallet": {
                                "value": { "channelId": "abc123", "wallet": "user.near" },
                            },
                        },
                    },
                },
            },
            "responses": {
                "200": {
                    "description": "Treat minted successfully",
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "object",
                                "properties": {
                                    "txId": { "type": "string", "description": "Transaction ID" },
                                },
                            },
                        },
                    },
                },
            },
        },
    })
}
