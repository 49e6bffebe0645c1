use crate::dns::cache::ResponseCache;
use crate::dns::upstream::UpstreamResolver;
use dnsbox_application::ports::{BlocklistPort, IpSetPort, PolicyPort};
use dnsbox_domain::normalize_name;
use hickory_proto::op::{Header, Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use tracing::{debug, error};

/// TTL of the synthesized `0.0.0.0` answer for blocked names.
pub const SINKHOLE_TTL: u32 = 3600;

/// Per-question pipeline: sinkhole, cache, upstream, IP-set population.
#[derive(Clone)]
pub struct DnsQueryHandler {
    blocklist: Option<Arc<dyn BlocklistPort>>,
    cache: Arc<ResponseCache>,
    policy: Arc<dyn PolicyPort>,
    upstream: Arc<UpstreamResolver>,
    ip_set: Arc<dyn IpSetPort>,
    ipv4_set: Option<String>,
    ipv6_set: Option<String>,
}

impl DnsQueryHandler {
    pub fn new(
        cache: Arc<ResponseCache>,
        policy: Arc<dyn PolicyPort>,
        upstream: Arc<UpstreamResolver>,
        ip_set: Arc<dyn IpSetPort>,
    ) -> Self {
        Self {
            blocklist: None,
            cache,
            policy,
            upstream,
            ip_set,
            ipv4_set: None,
            ipv6_set: None,
        }
    }

    pub fn with_blocklist(mut self, blocklist: Arc<dyn BlocklistPort>) -> Self {
        self.blocklist = Some(blocklist);
        self
    }

    pub fn with_ip_sets(mut self, ipv4_set: Option<String>, ipv6_set: Option<String>) -> Self {
        self.ipv4_set = ipv4_set;
        self.ipv6_set = ipv6_set;
        self
    }

    /// Builds the full reply for `request`, one answer section for all of
    /// its questions.
    pub async fn serve_query(&self, request: &Message) -> Message {
        let mut reply = Message::new();
        reply
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_recursion_available(true)
            .set_authoritative(true)
            .set_response_code(ResponseCode::NoError);

        for query in request.queries() {
            reply.add_query(query.clone());
            let answers = self.resolve_question(query.name(), query.query_type()).await;
            reply.add_answers(answers);
        }

        reply
    }

    /// Answers for a single question.
    pub async fn resolve_question(&self, name: &Name, record_type: RecordType) -> Vec<Record> {
        let domain = name.to_ascii();
        let domain = normalize_name(&domain);

        if self.is_blocked(&domain) {
            debug!(domain = %domain, "Sinkholed by blocklist");
            return vec![sinkhole_record(name)];
        }

        let answers = match self.cache.get(&domain, record_type) {
            Some(records) => {
                debug!(domain = %domain, record_type = %record_type, "Answered from cache");
                records
            }
            None => match self.upstream.resolve(name, record_type).await {
                Some(mut message) => {
                    let answers = message.take_answers();
                    self.cache.store_answers(&domain, record_type, &answers);
                    answers
                }
                None => Vec::new(),
            },
        };

        if self.policy.should_process(&domain) {
            self.populate_ip_sets(&domain, &answers).await;
        }

        answers
    }

    fn is_blocked(&self, domain: &str) -> bool {
        self.blocklist
            .as_ref()
            .is_some_and(|blocklist| blocklist.is_blocked(domain))
    }

    async fn populate_ip_sets(&self, domain: &str, answers: &[Record]) {
        for record in answers {
            let (set, ip) = match record.data() {
                RData::A(a) => (self.ipv4_set.as_deref(), IpAddr::V4(a.0)),
                RData::AAAA(aaaa) => (self.ipv6_set.as_deref(), IpAddr::V6(aaaa.0)),
                _ => continue,
            };
            let Some(set) = set else {
                continue;
            };

            match self.ip_set.add_element(set, ip, record.ttl()).await {
                Ok(()) => debug!(domain = %domain, set, ip = %ip, "Added to IP set"),
                Err(e) => {
                    error!(domain = %domain, set, ip = %ip, error = %e, "IP set update failed")
                }
            }
        }
    }
}

fn sinkhole_record(name: &Name) -> Record {
    Record::from_rdata(
        name.clone(),
        SINKHOLE_TTL,
        RData::A(A(Ipv4Addr::UNSPECIFIED)),
    )
}

#[async_trait::async_trait]
impl RequestHandler for DnsQueryHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let mut answers = Vec::new();
        for query in request.queries() {
            let name = query.original().name();
            answers.extend(self.resolve_question(name, query.query_type()).await);
        }

        let mut header = Header::response_from_request(request.header());
        header.set_authoritative(true);
        header.set_recursion_available(true);
        header.set_response_code(ResponseCode::NoError);

        let builder = MessageResponseBuilder::from_message_request(request);
        let response = builder.build(header, answers.iter(), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(src = %request.src(), error = %e, "Failed to send DNS response");
                let mut header = Header::response_from_request(request.header());
                header.set_response_code(ResponseCode::ServFail);
                header.into()
            }
        }
    }
}
