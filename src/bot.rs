use std::fmt;

use log::{debug, info, trace, warn};
use tokio::sync::mpsc::UnboundedReceiver;
use twitch_irc::message::ServerMessage;

use crate::chatters::Chatters;
use crate::config::TwitchBotConfig;
use crate::error::BotError;
use crate::events::{BotEvents, BotMessage, HandlerId};
use crate::twitch::{create_client, membership_request, ClientEvent, TwitchIRCClientType};

/// A chat bot bound to a single Twitch channel.
///
/// The bot listens to the IRC client's notifications, keeps track of who has
/// been chatting and how many raids came in, and re-raises three higher level
/// notifications: user joined, raid started and message received.
pub struct Bot {
    client: TwitchIRCClientType,
    incoming: Option<UnboundedReceiver<ServerMessage>>,
    username: String,
    channel: String,
    chatters: Chatters,
    raids_since_stream_begun: u32,
    events: BotEvents,
    started: bool,
    closed: bool,
}

impl Bot {
    /// Creates the bot and its IRC client. No connection is made until [`Bot::start`].
    ///
    /// Must be called from inside a tokio runtime.
    pub fn new(settings: &TwitchBotConfig) -> Result<Self, BotError> {
        let (incoming, client) = create_client(settings)?;

        Ok(Bot {
            client,
            incoming: Some(incoming),
            username: settings.name.trim().to_lowercase(),
            channel: settings.channel.trim().trim_start_matches('#').to_lowercase(),
            chatters: Chatters::new(),
            raids_since_stream_begun: 0,
            events: BotEvents::default(),
            started: false,
            closed: false,
        })
    }

    /// Joins the configured channel and asks for membership messages so other
    /// users' joins are delivered. The IRC client connects in the background;
    /// readiness shows up later as a channel-joined notification.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn start(&mut self) -> Result<(), BotError> {
        if self.closed {
            return Err(BotError::Closed);
        }
        if self.started {
            debug!("Bot already started for #{}", self.channel);
            return Ok(());
        }

        info!("Joining Twitch channel #{}...", self.channel);
        self.client
            .join(self.channel.clone())
            .map_err(|e| BotError::InvalidChannel {
                channel: self.channel.clone(),
                reason: e.to_string(),
            })?;

        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(e) = client.send_message(membership_request()).await {
                warn!("Failed to request twitch.tv/membership: {}", e);
            }
        });

        self.started = true;
        Ok(())
    }

    /// Pumps IRC messages into [`Bot::handle_server_message`] until the client
    /// shuts down or the bot is closed. Safe to cancel between messages.
    pub async fn run(&mut self) {
        loop {
            let message = match self.incoming.as_mut() {
                Some(incoming) => incoming.recv().await,
                None => {
                    warn!("Bot is closed, nothing to run");
                    return;
                }
            };

            match message {
                Some(message) => self.handle_server_message(message),
                None => {
                    info!("Twitch IRC message stream ended");
                    return;
                }
            }
        }
    }

    pub fn handle_server_message(&mut self, message: ServerMessage) {
        trace!("Received IRC message: {:?}", message);
        if let Some(event) = ClientEvent::from_server_message(message, &self.username) {
            self.handle_client_event(event);
        }
    }

    /// Applies one low-level notification to the bot's state and fans it out
    /// to subscribers. Every event is processed; none are rejected.
    pub fn handle_client_event(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::ChannelJoined { bot_username, channel } => {
                info!("Client joined channel ({}, {})", bot_username, channel);
            }
            ClientEvent::UserJoined { username, channel } => {
                info!("User {} joined {}", username, channel);

                let bot: &Bot = self;
                for handler in bot.events.user_joined.iter() {
                    handler(bot, &username);
                }
            }
            ClientEvent::MessageReceived { username, channel, is_subscriber, message } => {
                if self.chatters.register(&username) {
                    debug!("New chatter in #{}: {}", channel, username);
                }
                debug!("[#{}] {}: {}", channel, username, message);

                let bot: &Bot = self;
                let payload = BotMessage {
                    username: &username,
                    is_subscriber,
                    message: &message,
                    bot,
                };
                for handler in bot.events.message_received.iter() {
                    handler(&payload);
                }
            }
            ClientEvent::RaidNotification { channel, display_name } => {
                info!("{} is raiding {}", display_name, channel);

                self.raids_since_stream_begun += 1;

                let bot: &Bot = self;
                for handler in bot.events.raid_started.iter() {
                    handler(bot, &display_name);
                }
            }
        }
    }

    pub fn on_user_joined<F>(&mut self, handler: F) -> HandlerId
    where
        F: Fn(&Bot, &str) + Send + Sync + 'static,
    {
        self.events.user_joined.subscribe(Box::new(handler))
    }

    pub fn on_raid_started<F>(&mut self, handler: F) -> HandlerId
    where
        F: Fn(&Bot, &str) + Send + Sync + 'static,
    {
        self.events.raid_started.subscribe(Box::new(handler))
    }

    pub fn on_message_received<F>(&mut self, handler: F) -> HandlerId
    where
        F: Fn(&BotMessage<'_>) + Send + Sync + 'static,
    {
        self.events.message_received.subscribe(Box::new(handler))
    }

    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn events(&self) -> &BotEvents {
        &self.events
    }

    pub fn chatters(&self) -> &Chatters {
        &self.chatters
    }

    pub fn raids_since_stream_begun(&self) -> u32 {
        self.raids_since_stream_begun
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Leaves the channel, stops listening to the IRC client and drops every
    /// subscriber. Calling it again does nothing.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }

        if self.started {
            info!("Leaving Twitch channel #{}", self.channel);
            self.client.part(self.channel.clone());
        }
        self.incoming = None;
        self.events.clear();
        self.closed = true;
        debug!("Bot closed");
    }
}

impl Drop for Bot {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Bot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bot")
            .field("username", &self.username)
            .field("channel", &self.channel)
            .field("chatters", &self.chatters.len())
            .field("raids_since_stream_begun", &self.raids_since_stream_begun)
            .field("events", &self.events)
            .field("started", &self.started)
            .field("closed", &self.closed)
            .finish()
    }
}
