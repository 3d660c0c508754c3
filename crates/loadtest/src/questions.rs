/// Prompts sent by the chat task, ten each of short, medium and long.
pub const QUESTIONS: &[&str] = &[
    // Short
    "Hello, how are you?",
    "What is AI?",
    "Tell me a joke.",
    "What is 2+2?",
    "Define machine learning.",
    "What is Python?",
    "How does internet work?",
    "What is climate change?",
    "Explain blockchain.",
    "What is quantum computing?",
    // Medium
    "Explain the difference between artificial intelligence and machine learning.",
    "How does natural language processing work in modern AI systems?",
    "What are the main challenges in developing autonomous vehicles?",
    "Describe the process of training a neural network from scratch.",
    "How do recommendation systems work on platforms like Netflix and Amazon?",
    "What are the ethical implications of using AI in healthcare diagnostics?",
    "Explain the concept of transfer learning in deep learning models.",
    "How does computer vision technology enable facial recognition systems?",
    "What are the advantages and disadvantages of cloud computing for businesses?",
    "Describe the role of data preprocessing in machine learning workflows.",
    // Long
    "Provide a comprehensive analysis of how transformer architectures revolutionized natural language processing, \
     including their attention mechanism, scalability benefits, and impact on models like GPT and BERT.",
    "Explain in detail the technical challenges and solutions involved in building a distributed microservices \
     architecture for a high-traffic e-commerce platform, including database sharding, load balancing, and fault \
     tolerance.",
    "Discuss the complete software development lifecycle for a machine learning project, from data collection and \
     cleaning through model deployment and monitoring, including best practices for MLOps.",
    "Analyze the environmental impact of large-scale data centers and cryptocurrency mining, and propose sustainable \
     solutions that balance technological advancement with environmental responsibility.",
    "Describe the technical implementation details of implementing a real-time recommendation engine that can handle \
     millions of users simultaneously while maintaining sub-second response times and personalized accuracy.",
    "Explain the security challenges and solutions in implementing a zero-trust network architecture for a \
     multinational corporation with hybrid cloud infrastructure and remote workforce.",
    "Provide a detailed technical comparison between different containerization technologies (Docker, Kubernetes, \
     etc.) and their optimal use cases in various enterprise scenarios.",
    "Analyze the technical and business implications of transitioning from a monolithic application architecture to \
     a serverless, event-driven architecture using cloud-native technologies.",
    "Discuss the implementation challenges of building a scalable, real-time chat application that supports millions \
     of concurrent users, including WebSocket management, message routing, and data consistency.",
    "Explain the complete process of designing and implementing a computer vision system for autonomous drone \
     navigation, including sensor fusion, path planning, obstacle avoidance, and real-time decision making.",
];
